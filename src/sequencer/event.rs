/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Sequencer event types.
//!
//! This module defines the events emitted by the Sequencer after executing
//! each command.

use super::command::SequencerCommand;
use super::result::SequencerResult;
use serde::{Deserialize, Serialize};

/// Event emitted after executing a sequencer command.
///
/// Contains the sequence number, timestamp, original command, and result.
/// Events are emitted in sequence order and can be used for replay,
/// auditing, or real-time monitoring. A ticket that later leaves the queue
/// stays visible in the event history — the journal is the audit record.
///
/// # Examples
///
/// ```
/// use queueline_rs::sequencer::{SequencerCommand, SequencerEvent, SequencerResult};
/// use queueline_rs::shopqueue::{ShopQueueError, TicketId};
///
/// let ticket_id = TicketId::new();
/// let event = SequencerEvent::new(
///     1,
///     1234567890,
///     SequencerCommand::Complete { ticket_id },
///     SequencerResult::Rejected {
///         error: ShopQueueError::TicketNotFound(ticket_id),
///     },
/// );
/// assert_eq!(event.sequence_num, 1);
/// assert!(event.result.is_rejected());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencerEvent {
    /// Monotonically increasing sequence number.
    pub sequence_num: u64,

    /// Nanosecond timestamp when the command was executed. Ticket
    /// creation commands stamp this value into `joined_at_ns`, which is
    /// what makes replay reproduce identical FIFO ordering.
    pub timestamp_ns: u64,

    /// The command that was executed.
    pub command: SequencerCommand,

    /// The result of executing the command.
    pub result: SequencerResult,
}

impl SequencerEvent {
    /// Creates a new sequencer event.
    #[must_use]
    pub fn new(
        sequence_num: u64,
        timestamp_ns: u64,
        command: SequencerCommand,
        result: SequencerResult,
    ) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            command,
            result,
        }
    }
}

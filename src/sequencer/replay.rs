/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Deterministic replay engine for event journals.
//!
//! [`ReplayEngine`] reads a sequence of [`SequencerEvent`]s from a [`Journal`]
//! and re-applies each command to a fresh [`ShopQueue`], producing an
//! identical final state. Ticket ids are minted before submission and
//! creation timestamps are recorded on the event, so token numbers, FIFO
//! order and wait estimates all reproduce exactly. This enables disaster
//! recovery, audit compliance, and state verification.
//!
//! # Examples
//!
//! ```no_run
//! use queueline_rs::catalog::ServiceCatalog;
//! use queueline_rs::sequencer::journal::InMemoryJournal;
//! use queueline_rs::sequencer::replay::ReplayEngine;
//! use queueline_rs::shopqueue::{ShopConfig, ShopId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let journal = InMemoryJournal::new();
//! let config = ShopConfig::new(ShopId::new(), "Elite Cuts");
//! let (queue, last_seq) = ReplayEngine::replay_from(&journal, 0, config, ServiceCatalog::new())?;
//! println!("Replayed up to sequence {last_seq}");
//! # Ok(())
//! # }
//! ```

use super::command::SequencerCommand;
use super::event::SequencerEvent;
use super::journal::Journal;
use crate::catalog::ServiceCatalog;
use crate::shopqueue::{ShopConfig, ShopQueue, ShopQueueError, ShopQueueSnapshot};
use thiserror::Error;

/// Errors that can occur during journal replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The journal contains no events to replay.
    #[error("journal is empty — nothing to replay")]
    EmptyJournal,

    /// The requested starting sequence number exceeds the journal's last entry.
    #[error("invalid from_sequence {from_sequence}: journal last sequence is {last_sequence}")]
    InvalidSequence {
        /// The sequence number requested.
        from_sequence: u64,
        /// The last sequence number in the journal.
        last_sequence: u64,
    },

    /// A gap was detected between expected and found sequence numbers.
    #[error("sequence gap detected: expected {expected}, found {found}")]
    SequenceGap {
        /// The expected next sequence number.
        expected: u64,
        /// The actual sequence number found.
        found: u64,
    },

    /// A ShopQueue operation failed during replay.
    #[error("queue error during replay at sequence {sequence_num}: {source}")]
    QueueError {
        /// The sequence number of the event that caused the error.
        sequence_num: u64,
        /// The underlying error.
        #[source]
        source: ShopQueueError,
    },

    /// The replayed state does not match the expected snapshot.
    #[error("snapshot mismatch: replayed state diverges from expected snapshot")]
    SnapshotMismatch,
}

/// Stateless replay engine that reconstructs [`ShopQueue`] state from a [`Journal`].
///
/// All methods are associated functions (no `&self` receiver) — `ReplayEngine`
/// holds no state itself. Use it as a namespace for replay operations.
///
/// # Examples
///
/// ```no_run
/// use queueline_rs::catalog::ServiceCatalog;
/// use queueline_rs::sequencer::journal::InMemoryJournal;
/// use queueline_rs::sequencer::replay::ReplayEngine;
/// use queueline_rs::shopqueue::{ShopConfig, ShopId};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let journal = InMemoryJournal::new();
/// let config = ShopConfig::new(ShopId::new(), "Elite Cuts");
/// let (queue, last_seq) = ReplayEngine::replay_from(&journal, 0, config, ServiceCatalog::new())?;
/// # Ok(())
/// # }
/// ```
pub struct ReplayEngine;

impl ReplayEngine {
    /// Replays all events from `from_sequence` onwards onto a fresh [`ShopQueue`].
    ///
    /// Returns the reconstructed queue and the sequence number of the last
    /// event applied. Only successful mutating commands are replayed —
    /// rejected events and query events are skipped without error.
    ///
    /// # Arguments
    ///
    /// * `journal` — the event source
    /// * `from_sequence` — first sequence number to include (inclusive); pass `0` for full replay
    /// * `config` — shop config used to create the fresh queue
    /// * `catalog` — the shop's service catalog at the time the journal was written
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    /// - [`ReplayError::QueueError`] if a command fails unexpectedly during replay
    pub fn replay_from(
        journal: &impl Journal,
        from_sequence: u64,
        config: ShopConfig,
        catalog: ServiceCatalog,
    ) -> Result<(ShopQueue, u64), ReplayError> {
        Self::replay_from_with_progress(journal, from_sequence, config, catalog, |_, _| {})
    }

    /// Replays events with a progress callback invoked after each applied event.
    ///
    /// The callback receives `(events_applied: u64, current_sequence: u64)`.
    /// Useful for long replays where progress reporting is needed.
    ///
    /// # Arguments
    ///
    /// * `journal` — the event source
    /// * `from_sequence` — first sequence number to include; pass `0` for full replay
    /// * `config` — shop config for the fresh queue
    /// * `catalog` — the shop's service catalog
    /// * `progress` — callback invoked after each event: `(events_applied, sequence_num)`
    ///
    /// # Errors
    ///
    /// Same as [`replay_from`](Self::replay_from).
    pub fn replay_from_with_progress(
        journal: &impl Journal,
        from_sequence: u64,
        config: ShopConfig,
        catalog: ServiceCatalog,
        progress: impl Fn(u64, u64),
    ) -> Result<(ShopQueue, u64), ReplayError> {
        if journal.is_empty() {
            return Err(ReplayError::EmptyJournal);
        }

        if journal
            .last_sequence()
            .is_some_and(|last| from_sequence > last)
        {
            return Err(ReplayError::InvalidSequence {
                from_sequence,
                last_sequence: journal.last_sequence().unwrap_or(0),
            });
        }

        let mut queue = ShopQueue::new(config, catalog);
        let mut last_seq = 0u64;
        let mut count = 0u64;

        for event in journal.read_from(from_sequence) {
            Self::apply_event(&mut queue, event)?;
            last_seq = event.sequence_num;
            count = count.saturating_add(1);
            progress(count, last_seq);
        }

        Ok((queue, last_seq))
    }

    /// Returns the events with `from_sequence <= sequence_num <= to_sequence`.
    ///
    /// No ShopQueue is constructed — this is a pure slice of the journal.
    /// Useful for auditing, debugging, or feeding events to external consumers.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    #[must_use = "returns the event slice — use it or it is wasted work"]
    pub fn replay_range(
        journal: &impl Journal,
        from_sequence: u64,
        to_sequence: u64,
    ) -> Result<Vec<&SequencerEvent>, ReplayError> {
        if journal.is_empty() {
            return Err(ReplayError::EmptyJournal);
        }

        if journal
            .last_sequence()
            .is_some_and(|last| from_sequence > last)
        {
            return Err(ReplayError::InvalidSequence {
                from_sequence,
                last_sequence: journal.last_sequence().unwrap_or(0),
            });
        }

        Ok(journal.read_range(from_sequence, to_sequence).collect())
    }

    /// Replays the full journal and compares the result to an expected snapshot.
    ///
    /// Returns `Ok(true)` if the replayed state matches, `Ok(false)` if it
    /// diverges. The comparison uses [`snapshots_match`] which checks shop
    /// id, paused flag and per-entry placement.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::QueueError`] if replay fails
    pub fn verify(
        journal: &impl Journal,
        expected_snapshot: &ShopQueueSnapshot,
        config: ShopConfig,
        catalog: ServiceCatalog,
    ) -> Result<bool, ReplayError> {
        let (queue, _) = Self::replay_from(journal, 0, config, catalog)?;
        let actual = queue.snapshot();
        Ok(snapshots_match(&actual, expected_snapshot))
    }

    /// Applies a single sequencer event to the given queue.
    ///
    /// Events with `Rejected` results are skipped — they represent commands
    /// that failed at write time and must not be re-applied during replay.
    /// Query events carry no state change and are skipped the same way.
    fn apply_event(queue: &mut ShopQueue, event: &SequencerEvent) -> Result<(), ReplayError> {
        // Skip events whose original execution was rejected.
        if event.result.is_rejected() {
            return Ok(());
        }

        let fail = |source: ShopQueueError| ReplayError::QueueError {
            sequence_num: event.sequence_num,
            source,
        };

        match &event.command {
            SequencerCommand::Join {
                ticket_id,
                customer_id,
                selection,
            } => {
                queue
                    .join(*ticket_id, *customer_id, selection, event.timestamp_ns)
                    .map_err(fail)?;
            }
            SequencerCommand::AddWalkIn {
                ticket_id,
                name,
                selection,
            } => {
                queue
                    .add_walk_in(*ticket_id, name, selection, event.timestamp_ns)
                    .map_err(fail)?;
            }
            SequencerCommand::StartServing { ticket_id } => {
                queue.start_serving(*ticket_id).map_err(fail)?;
            }
            SequencerCommand::Complete { ticket_id } => {
                queue.complete(*ticket_id).map_err(fail)?;
            }
            SequencerCommand::Skip { ticket_id } => {
                queue.skip(*ticket_id).map_err(fail)?;
            }
            SequencerCommand::Leave { ticket_id } => {
                queue.leave(*ticket_id).map_err(fail)?;
            }
            SequencerCommand::SetPaused { paused } => {
                queue.set_paused(*paused);
            }
            // Queries carry no state change.
            SequencerCommand::Snapshot | SequencerCommand::CustomerStatus { .. } => {}
        }

        Ok(())
    }
}

/// Compares two [`ShopQueueSnapshot`]s for structural equality.
///
/// Two snapshots are considered equal when:
/// - `shop_id` and `paused` are identical
/// - The entries match pairwise by token number, status, position and
///   estimated wait
///
/// Snapshot timestamps are intentionally excluded from comparison because
/// replayed queues are snapshotted at a different wall-clock time than the
/// original.
///
/// # Examples
///
/// ```
/// use queueline_rs::sequencer::replay::snapshots_match;
/// use queueline_rs::shopqueue::{ShopId, ShopQueueSnapshot};
///
/// let shop_id = ShopId::new();
/// let a = ShopQueueSnapshot {
///     shop_id,
///     paused: false,
///     active_servers: 1,
///     timestamp_ns: 0,
///     entries: vec![],
/// };
/// let b = ShopQueueSnapshot {
///     shop_id,
///     paused: false,
///     active_servers: 1,
///     timestamp_ns: 999,
///     entries: vec![],
/// };
/// assert!(snapshots_match(&a, &b));
/// ```
#[must_use]
pub fn snapshots_match(actual: &ShopQueueSnapshot, expected: &ShopQueueSnapshot) -> bool {
    if actual.shop_id != expected.shop_id || actual.paused != expected.paused {
        return false;
    }

    if actual.entries.len() != expected.entries.len() {
        return false;
    }
    for (a, b) in actual.entries.iter().zip(expected.entries.iter()) {
        if a.ticket.token_number != b.ticket.token_number
            || a.ticket.status != b.ticket.status
            || a.position != b.position
            || a.estimated_wait_minutes != b.estimated_wait_minutes
        {
            return false;
        }
    }

    true
}

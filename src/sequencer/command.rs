/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Sequencer command types.
//!
//! This module defines the commands that can be submitted to the Sequencer
//! for ordered execution on a shop's queue.

use crate::catalog::DurationId;
use crate::shopqueue::{CustomerId, TicketId};
use serde::{Deserialize, Serialize};

/// Commands that can be submitted to the Sequencer.
///
/// Each command represents one operation to be executed against a shop's
/// queue in a deterministic, totally-ordered sequence. Commands that create
/// tickets carry a pre-minted [`TicketId`] (use the
/// [`join`](Self::join)/[`walk_in`](Self::walk_in) constructors) so that
/// replaying a journal reproduces identical state.
///
/// # Examples
///
/// ```
/// use queueline_rs::catalog::DurationId;
/// use queueline_rs::sequencer::SequencerCommand;
/// use queueline_rs::shopqueue::CustomerId;
///
/// let command = SequencerCommand::join(CustomerId::new(), vec![DurationId::new()]);
/// assert!(command.is_mutation());
/// assert!(!SequencerCommand::Snapshot.is_mutation());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SequencerCommand {
    /// Add an app customer to the line.
    Join {
        /// Pre-minted id for the new ticket.
        ticket_id: TicketId,
        /// The joining customer.
        customer_id: CustomerId,
        /// Selected duration-variant ids. Must be non-empty.
        selection: Vec<DurationId>,
    },

    /// Add a walk-in customer to the line.
    AddWalkIn {
        /// Pre-minted id for the new ticket.
        ticket_id: TicketId,
        /// Display name of the walk-in. Must not be blank.
        name: String,
        /// Selected duration-variant ids. Must be non-empty.
        selection: Vec<DurationId>,
    },

    /// Move a waiting ticket into a free server slot.
    StartServing {
        /// The ticket to start serving.
        ticket_id: TicketId,
    },

    /// Finish a serving ticket and auto-advance the next waiter.
    Complete {
        /// The ticket to complete.
        ticket_id: TicketId,
    },

    /// Skip a waiting or serving ticket.
    Skip {
        /// The ticket to skip.
        ticket_id: TicketId,
    },

    /// Remove a waiting ticket from the queue entirely.
    Leave {
        /// The ticket leaving the queue.
        ticket_id: TicketId,
    },

    /// Pause or resume the shop's queue.
    SetPaused {
        /// The new paused state.
        paused: bool,
    },

    /// Read a consistent snapshot of the live queue.
    Snapshot,

    /// Read a customer's live queue placement.
    CustomerStatus {
        /// The customer asking for their status.
        customer_id: CustomerId,
    },
}

impl SequencerCommand {
    /// Builds a [`Join`](Self::Join) command with a freshly minted ticket id.
    #[must_use]
    pub fn join(customer_id: CustomerId, selection: Vec<DurationId>) -> Self {
        Self::Join {
            ticket_id: TicketId::new(),
            customer_id,
            selection,
        }
    }

    /// Builds an [`AddWalkIn`](Self::AddWalkIn) command with a freshly
    /// minted ticket id.
    #[must_use]
    pub fn walk_in(name: impl Into<String>, selection: Vec<DurationId>) -> Self {
        Self::AddWalkIn {
            ticket_id: TicketId::new(),
            name: name.into(),
            selection,
        }
    }

    /// Returns `true` for commands that may change queue state.
    ///
    /// Queries ([`Snapshot`](Self::Snapshot),
    /// [`CustomerStatus`](Self::CustomerStatus)) flow through the same
    /// ordered loop for snapshot isolation but are skipped during replay.
    #[inline]
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Snapshot | Self::CustomerStatus { .. })
    }
}

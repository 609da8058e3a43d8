/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Sequencer result types.
//!
//! This module defines the result types returned after executing commands
//! on the Sequencer.

use crate::shopqueue::{
    CustomerStatus, QueueEntry, ShopQueueError, ShopQueueSnapshot, Ticket, TicketId,
};
use serde::{Deserialize, Serialize};

/// Result of executing a sequencer command.
///
/// Indicates whether the command succeeded and what the outcome was.
/// Rejections carry the domain error; the sequence number still advances,
/// so a rejected command leaves a gap-free audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SequencerResult {
    /// An app customer joined the queue.
    Joined {
        /// The created ticket with its derived placement.
        entry: QueueEntry,
    },

    /// A walk-in was added to the queue.
    WalkInAdded {
        /// The created ticket with its derived placement.
        entry: QueueEntry,
    },

    /// A waiting ticket moved into a server slot.
    ServingStarted {
        /// The ticket now being served.
        ticket: Ticket,
    },

    /// A serving ticket finished.
    Completed {
        /// The completed ticket.
        ticket: Ticket,
        /// The waiting ticket auto-advanced into the freed slot, if any.
        auto_advanced: Option<Ticket>,
    },

    /// A ticket was skipped.
    Skipped {
        /// The skipped ticket.
        ticket: Ticket,
        /// The waiting ticket auto-advanced into the freed slot, if any.
        auto_advanced: Option<Ticket>,
    },

    /// A waiting ticket left the queue.
    Left {
        /// The departed ticket. Its token number is never reused.
        ticket: Ticket,
    },

    /// The shop's paused flag was set.
    PauseSet {
        /// The paused state after the command.
        paused: bool,
    },

    /// A consistent snapshot of the live queue.
    Snapshot {
        /// The snapshot.
        snapshot: ShopQueueSnapshot,
    },

    /// A customer's live queue placement.
    CustomerStatus {
        /// The placement, or `None` when the customer holds no live ticket.
        status: Option<CustomerStatus>,
    },

    /// Command was rejected due to a domain error.
    Rejected {
        /// The error that caused rejection.
        error: ShopQueueError,
    },
}

impl SequencerResult {
    /// Returns `true` if the command was successful.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// Returns `true` if the command was rejected.
    #[inline]
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns the id of the ticket the result is about, if any.
    #[must_use]
    pub fn ticket_id(&self) -> Option<TicketId> {
        match self {
            Self::Joined { entry } | Self::WalkInAdded { entry } => Some(entry.ticket.id),
            Self::ServingStarted { ticket }
            | Self::Completed { ticket, .. }
            | Self::Skipped { ticket, .. }
            | Self::Left { ticket } => Some(ticket.id),
            Self::PauseSet { .. }
            | Self::Snapshot { .. }
            | Self::CustomerStatus { .. }
            | Self::Rejected { .. } => None,
        }
    }
}

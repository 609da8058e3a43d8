/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Point-in-time views of a shop's queue.
//!
//! Snapshots carry the live tickets only (`waiting` and `serving`), in
//! display order, with 1-based positions and derived wait estimates. Field
//! names serialize camelCase and statuses SCREAMING_SNAKE_CASE to match the
//! client contract; internally everything stays strongly typed.

use super::ticket::{ShopId, Ticket, TicketId};
use serde::{Deserialize, Serialize};

/// One ticket in a snapshot, together with its derived queue placement.
///
/// The estimate is the simplifying model from the ordering rules: the sum
/// of the waiting durations strictly ahead, divided by the active-server
/// count, rounded up. A serving ticket's estimate is always 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    /// The ticket itself.
    pub ticket: Ticket,

    /// 1-based rank in the live ordering (serving before waiting).
    pub position: usize,

    /// Number of live tickets ahead of this one: `position - 1`.
    pub people_ahead: usize,

    /// Estimated wait in minutes, recomputed on every query.
    #[serde(rename = "estimatedWaitTime")]
    pub estimated_wait_minutes: u32,
}

/// Consistent point-in-time view of one shop's live queue.
///
/// Obtained from [`ShopQueue::snapshot`]. Completed and skipped tickets
/// are excluded. The timestamp records when the snapshot was taken and is
/// excluded from replay comparison (see [`snapshots_match`]).
///
/// [`ShopQueue::snapshot`]: crate::shopqueue::ShopQueue::snapshot
/// [`snapshots_match`]: crate::sequencer::replay::snapshots_match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopQueueSnapshot {
    /// The shop this snapshot belongs to.
    pub shop_id: ShopId,

    /// Whether the shop was paused at snapshot time.
    pub paused: bool,

    /// The shop's active-server count at snapshot time.
    pub active_servers: u32,

    /// Nanoseconds since the Unix epoch when the snapshot was taken.
    pub timestamp_ns: u64,

    /// The live tickets in display order.
    pub entries: Vec<QueueEntry>,
}

impl ShopQueueSnapshot {
    /// Returns the number of live tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no live tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry for a specific ticket, if it is live.
    #[must_use]
    pub fn entry(&self, ticket_id: TicketId) -> Option<&QueueEntry> {
        self.entries.iter().find(|e| e.ticket.id == ticket_id)
    }
}

/// The caller-facing answer to "where am I in line?".
///
/// Mirrors the customer-status response shape: the caller's own ticket with
/// its placement, plus the full ordered live queue for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStatus {
    /// The caller's live ticket.
    pub ticket: Ticket,

    /// 1-based rank in the live ordering.
    pub current_position: usize,

    /// Number of live tickets ahead of the caller.
    pub people_ahead: usize,

    /// Estimated wait in minutes.
    #[serde(rename = "estimatedWaitTime")]
    pub estimated_wait_minutes: u32,

    /// The full ordered live queue.
    pub full_queue: Vec<QueueEntry>,
}

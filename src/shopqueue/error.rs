/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Error taxonomy of the queue core.
//!
//! Every variant is a client-input error: it is surfaced directly to the
//! caller with a descriptive message and maps to a 4xx-equivalent status at
//! the transport boundary. None are retriable — a rejected command was
//! never applied. Infra failures (storage, transport) are the collaborators'
//! concern and deliberately do not appear here.

use super::ticket::{ShopId, TicketId, TicketStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`ShopQueue`] operations.
///
/// [`ShopQueue`]: crate::shopqueue::ShopQueue
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ShopQueueError {
    /// The selection was empty or referenced an unknown duration variant.
    #[error("invalid selection: {reason}")]
    InvalidSelection {
        /// What was wrong with the selection.
        reason: String,
    },

    /// A walk-in was submitted with a blank display name.
    #[error("walk-in name must not be blank")]
    InvalidName,

    /// The shop cannot accept the operation right now (paused, or still a
    /// draft with no address or no services).
    #[error("shop {shop_id} is unavailable: {reason}")]
    ShopUnavailable {
        /// The shop that rejected the operation.
        shop_id: ShopId,
        /// Why the shop is unavailable.
        reason: String,
    },

    /// The ticket is not in a state the requested transition accepts.
    #[error("ticket {ticket_id} is {status}, cannot {operation}")]
    InvalidTransition {
        /// The ticket whose transition was rejected.
        ticket_id: TicketId,
        /// The ticket's current status.
        status: TicketStatus,
        /// The operation that was attempted.
        operation: String,
    },

    /// Every server slot is already occupied by a serving ticket.
    #[error("all {active_servers} server slots are occupied")]
    CapacityExceeded {
        /// The shop's active-server count.
        active_servers: u32,
    },

    /// No ticket with the given id exists in this shop's queue.
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),
}

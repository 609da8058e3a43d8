/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Ticket types: ids, status and the queue entry itself.

use crate::catalog::Selection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(Uuid);

impl ShopId {
    /// Creates a new random shop id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShopId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of an app customer.
///
/// Walk-ins have no customer id; they carry a display name instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Creates a new random customer id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a [`Ticket`].
///
/// Minted by the caller (or the command constructor) before the ticket is
/// created, so that journal replay reproduces identical state.
///
/// # Examples
///
/// ```
/// use queueline_rs::shopqueue::TicketId;
///
/// let id = TicketId::new();
/// assert_ne!(id, TicketId::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Creates a new random ticket id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a ticket.
///
/// The canonical representation is this enum. It displays lowercase for
/// logs and error messages and serializes SCREAMING_SNAKE_CASE for the
/// wire, where the backend contract speaks `WAITING`/`SERVING`/...
///
/// Status only moves forward: waiting → serving → completed, or
/// waiting/serving → skipped. There is no backward transition.
///
/// # Examples
///
/// ```
/// use queueline_rs::shopqueue::TicketStatus;
///
/// assert_eq!(TicketStatus::Serving.to_string(), "serving");
/// assert!(TicketStatus::Completed.is_terminal());
/// assert!(TicketStatus::Waiting.is_live());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// In line, not yet being served.
    Waiting,

    /// Currently occupying a server slot.
    Serving,

    /// Service finished. Terminal.
    Completed,

    /// Removed from the line without being served (no-show or barber
    /// decision). Terminal.
    Skipped,
}

impl TicketStatus {
    /// Returns `true` for states that appear in the live queue view.
    #[inline]
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Waiting | Self::Serving)
    }

    /// Returns `true` for states a ticket can never leave.
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Waiting => "waiting",
            Self::Serving => "serving",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        };
        write!(f, "{s}")
    }
}

/// One customer's (or walk-in's) place in a shop's line.
///
/// Tickets are created by [`ShopQueue::join`] or [`ShopQueue::add_walk_in`]
/// and mutated only through the transition operations on [`ShopQueue`].
/// Totals are derived from the selection; the estimated wait is derived at
/// query time and never stored here.
///
/// [`ShopQueue`]: crate::shopqueue::ShopQueue
/// [`ShopQueue::join`]: crate::shopqueue::ShopQueue::join
/// [`ShopQueue::add_walk_in`]: crate::shopqueue::ShopQueue::add_walk_in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique id of the ticket.
    pub id: TicketId,

    /// The shop whose line this ticket is in.
    pub shop_id: ShopId,

    /// The app customer holding the ticket. `None` for walk-ins.
    pub customer_id: Option<CustomerId>,

    /// Free-text display name. `Some` for walk-ins, `None` for app joins
    /// (the presentation layer resolves customer names).
    pub display_name: Option<String>,

    /// The selected Service+Duration pairs. Non-empty.
    pub selection: Selection,

    /// Shop-scoped, monotonically increasing display number. Assigned at
    /// creation, never reused, never reassigned. Distinct from queue
    /// position.
    pub token_number: u64,

    /// Current lifecycle state.
    pub status: TicketStatus,

    /// `true` when the ticket was entered by shop staff for a customer
    /// without an app account. Immutable after creation.
    pub is_walk_in: bool,

    /// Creation timestamp in nanoseconds since the Unix epoch. Used for
    /// FIFO tie-breaking.
    pub joined_at_ns: u64,
}

impl Ticket {
    /// Sum of the selected durations' minutes.
    #[inline]
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.selection.total_minutes()
    }

    /// Sum of the selected durations' prices in cents.
    #[inline]
    #[must_use]
    pub fn total_price_cents(&self) -> u64 {
        self.selection.total_price_cents()
    }

    /// FIFO ordering key: earliest joined first, token number as tie-break.
    #[inline]
    #[must_use]
    pub fn queue_key(&self) -> (u64, u64) {
        (self.joined_at_ns, self.token_number)
    }
}

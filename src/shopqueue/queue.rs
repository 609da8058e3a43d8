/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! The per-shop queue aggregate.
//!
//! [`ShopQueue`] owns the ordered collection of tickets for one shop,
//! assigns monotonic token numbers, computes positions and wait estimates,
//! and enforces the ticket state machine. It is a synchronous, single-owner
//! structure: all cross-thread machinery lives one layer up in the
//! [`Sequencer`], which serializes every operation against the same shop.
//!
//! [`Sequencer`]: crate::sequencer::Sequencer

use super::error::ShopQueueError;
use super::snapshot::{CustomerStatus, QueueEntry, ShopQueueSnapshot};
use super::ticket::{CustomerId, ShopId, Ticket, TicketId, TicketStatus};
use crate::catalog::{DurationId, ServiceCatalog};
use serde::{Deserialize, Serialize};

/// Shop identity and queue parameters.
///
/// A shop with no address or no services is a draft: it exists but cannot
/// accept queue joins yet.
///
/// # Examples
///
/// ```
/// use queueline_rs::shopqueue::{ShopConfig, ShopId};
///
/// let config = ShopConfig::new(ShopId::new(), "Elite Cuts")
///     .with_address("123 Main Street")
///     .with_active_servers(2);
/// assert_eq!(config.active_servers, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// Unique id of the shop.
    pub shop_id: ShopId,

    /// Display name of the shop.
    pub name: String,

    /// Street address. `None` while the shop is still a draft.
    pub address: Option<String>,

    /// Number of barbers/servers working the line in parallel. Clamped to
    /// at least 1 wherever it divides wait times or bounds capacity.
    pub active_servers: u32,
}

impl ShopConfig {
    /// Creates a draft config: no address, one active server.
    #[must_use]
    pub fn new(shop_id: ShopId, name: impl Into<String>) -> Self {
        Self {
            shop_id,
            name: name.into(),
            address: None,
            active_servers: 1,
        }
    }

    /// Sets the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the active-server count.
    #[must_use]
    pub fn with_active_servers(mut self, active_servers: u32) -> Self {
        self.active_servers = active_servers;
        self
    }
}

/// Outcome of a `complete` or `skip` transition.
///
/// Carries the transitioned ticket and, when a server slot freed up and the
/// shop was not paused, the waiting ticket that was auto-advanced into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTransition {
    /// The ticket the caller transitioned.
    pub ticket: Ticket,

    /// The earliest-joined waiting ticket promoted to serving, if any.
    pub auto_advanced: Option<Ticket>,
}

/// The ordered collection of all tickets for one shop.
///
/// # Examples
///
/// ```
/// use queueline_rs::catalog::{DurationVariant, Service, ServiceCatalog};
/// use queueline_rs::shopqueue::{CustomerId, ShopConfig, ShopId, ShopQueue, TicketId};
///
/// let cut = DurationVariant::new("Standard", 30, 2500);
/// let cut_id = cut.id;
/// let catalog = ServiceCatalog::from_services(vec![Service::new("Haircut", vec![cut])]);
/// let config = ShopConfig::new(ShopId::new(), "Elite Cuts").with_address("123 Main Street");
///
/// let mut queue = ShopQueue::new(config, catalog);
/// let entry = queue
///     .join(TicketId::new(), CustomerId::new(), &[cut_id], 0)
///     .unwrap();
/// assert_eq!(entry.ticket.token_number, 1);
/// assert_eq!(entry.position, 1);
/// assert_eq!(entry.estimated_wait_minutes, 0);
/// ```
#[derive(Debug, Clone)]
pub struct ShopQueue {
    config: ShopConfig,
    catalog: ServiceCatalog,

    /// All tickets in creation order. Completed and skipped tickets stay
    /// here (excluded from the live view); `leave` removes its ticket.
    tickets: Vec<Ticket>,

    /// Next token number to assign. Monotonic, never rewound — `leave`
    /// must not cause token reuse.
    next_token: u64,

    /// While paused, joins are rejected and nothing transitions into
    /// serving.
    paused: bool,
}

impl ShopQueue {
    /// Creates an empty queue for the given shop.
    #[must_use]
    pub fn new(config: ShopConfig, catalog: ServiceCatalog) -> Self {
        Self {
            config,
            catalog,
            tickets: Vec::new(),
            next_token: 1,
            paused: false,
        }
    }

    /// Returns the shop id.
    #[inline]
    #[must_use]
    pub fn shop_id(&self) -> ShopId {
        self.config.shop_id
    }

    /// Returns the shop config.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Returns the service catalog.
    #[must_use]
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Returns `true` while the queue is paused.
    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The active-server count used for capacity and wait-time division.
    #[inline]
    #[must_use]
    pub fn active_servers(&self) -> u32 {
        self.config.active_servers.max(1)
    }

    /// Sets the paused flag. While paused, `join`/`add_walk_in` are
    /// rejected and neither `start_serving` nor auto-advance may move a
    /// ticket into serving.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Returns the number of tickets currently in serving state.
    #[must_use]
    pub fn serving_count(&self) -> usize {
        self.tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Serving)
            .count()
    }

    /// Returns the number of live (waiting or serving) tickets.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.tickets.iter().filter(|t| t.status.is_live()).count()
    }

    /// Looks up a ticket by id.
    #[must_use]
    pub fn ticket(&self, ticket_id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == ticket_id)
    }

    /// Adds an app customer to the line.
    ///
    /// Assigns the next token number, computes totals from the resolved
    /// selection and appends the ticket in waiting state. Returns the
    /// created ticket with its derived position and wait estimate.
    ///
    /// # Errors
    ///
    /// - [`ShopQueueError::ShopUnavailable`] if the shop is paused or
    ///   still a draft (no address, or no services)
    /// - [`ShopQueueError::InvalidSelection`] if `selected` is empty or
    ///   contains an unknown duration-variant id
    pub fn join(
        &mut self,
        ticket_id: TicketId,
        customer_id: CustomerId,
        selected: &[DurationId],
        joined_at_ns: u64,
    ) -> Result<QueueEntry, ShopQueueError> {
        self.admit(ticket_id, Some(customer_id), None, selected, joined_at_ns)
    }

    /// Adds a walk-in customer to the line.
    ///
    /// Same validation and placement as [`join`](Self::join) — walk-ins go
    /// into the same ordered queue with no priority lane — except the
    /// ticket carries a display name instead of a customer id.
    ///
    /// # Errors
    ///
    /// As [`join`](Self::join), plus [`ShopQueueError::InvalidName`] when
    /// `name` is blank.
    pub fn add_walk_in(
        &mut self,
        ticket_id: TicketId,
        name: &str,
        selected: &[DurationId],
        joined_at_ns: u64,
    ) -> Result<QueueEntry, ShopQueueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShopQueueError::InvalidName);
        }
        self.admit(ticket_id, None, Some(name.to_string()), selected, joined_at_ns)
    }

    /// Common admission path for app joins and walk-ins.
    fn admit(
        &mut self,
        ticket_id: TicketId,
        customer_id: Option<CustomerId>,
        display_name: Option<String>,
        selected: &[DurationId],
        joined_at_ns: u64,
    ) -> Result<QueueEntry, ShopQueueError> {
        self.ensure_accepting()?;

        if selected.is_empty() {
            return Err(ShopQueueError::InvalidSelection {
                reason: "no duration variants selected".to_string(),
            });
        }
        let selection = self
            .catalog
            .resolve(selected)
            .map_err(|unknown| ShopQueueError::InvalidSelection {
                reason: format!("unknown duration variant {unknown}"),
            })?;

        let token_number = self.next_token;
        self.next_token += 1;

        let is_walk_in = customer_id.is_none();
        self.tickets.push(Ticket {
            id: ticket_id,
            shop_id: self.config.shop_id,
            customer_id,
            display_name,
            selection,
            token_number,
            status: TicketStatus::Waiting,
            is_walk_in,
            joined_at_ns,
        });

        // The entry exists — it was just pushed.
        Ok(self
            .ordered_entries()
            .into_iter()
            .find(|e| e.ticket.id == ticket_id)
            .unwrap_or_else(|| unreachable!("freshly admitted ticket is live")))
    }

    /// Moves a waiting ticket into a free server slot.
    ///
    /// The caller names the ticket explicitly; the queue never auto-picks
    /// here (auto-advance after `complete`/`skip` is the one exception).
    ///
    /// # Errors
    ///
    /// - [`ShopQueueError::TicketNotFound`] if the ticket does not exist
    /// - [`ShopQueueError::InvalidTransition`] if it is not waiting
    /// - [`ShopQueueError::ShopUnavailable`] while the shop is paused
    /// - [`ShopQueueError::CapacityExceeded`] if every server slot is
    ///   occupied
    pub fn start_serving(&mut self, ticket_id: TicketId) -> Result<Ticket, ShopQueueError> {
        let serving = self.serving_count();
        let active_servers = self.active_servers();
        let paused = self.paused;
        let shop_id = self.config.shop_id;

        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(ShopQueueError::TicketNotFound(ticket_id))?;

        if ticket.status != TicketStatus::Waiting {
            return Err(ShopQueueError::InvalidTransition {
                ticket_id,
                status: ticket.status,
                operation: "start serving".to_string(),
            });
        }
        if paused {
            return Err(ShopQueueError::ShopUnavailable {
                shop_id,
                reason: "queue is paused".to_string(),
            });
        }
        if serving >= active_servers as usize {
            return Err(ShopQueueError::CapacityExceeded { active_servers });
        }

        ticket.status = TicketStatus::Serving;
        Ok(ticket.clone())
    }

    /// Finishes a serving ticket.
    ///
    /// After the transition the freed slot is offered to the
    /// earliest-joined waiting ticket (auto-advance), unless the shop is
    /// paused.
    ///
    /// # Errors
    ///
    /// - [`ShopQueueError::TicketNotFound`] if the ticket does not exist
    /// - [`ShopQueueError::InvalidTransition`] if it is not serving
    pub fn complete(&mut self, ticket_id: TicketId) -> Result<TicketTransition, ShopQueueError> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(ShopQueueError::TicketNotFound(ticket_id))?;

        if ticket.status != TicketStatus::Serving {
            return Err(ShopQueueError::InvalidTransition {
                ticket_id,
                status: ticket.status,
                operation: "complete".to_string(),
            });
        }

        ticket.status = TicketStatus::Completed;
        let ticket = ticket.clone();
        let auto_advanced = self.auto_advance();
        Ok(TicketTransition {
            ticket,
            auto_advanced,
        })
    }

    /// Removes a ticket from the line without serving it.
    ///
    /// Skipping a no-show must not stall the line: when the skipped ticket
    /// was serving, the freed slot is offered to the next waiting ticket
    /// exactly as in [`complete`](Self::complete).
    ///
    /// # Errors
    ///
    /// - [`ShopQueueError::TicketNotFound`] if the ticket does not exist
    /// - [`ShopQueueError::InvalidTransition`] if it is already terminal
    pub fn skip(&mut self, ticket_id: TicketId) -> Result<TicketTransition, ShopQueueError> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(ShopQueueError::TicketNotFound(ticket_id))?;

        if !ticket.status.is_live() {
            return Err(ShopQueueError::InvalidTransition {
                ticket_id,
                status: ticket.status,
                operation: "skip".to_string(),
            });
        }

        let was_serving = ticket.status == TicketStatus::Serving;
        ticket.status = TicketStatus::Skipped;
        let ticket = ticket.clone();

        let auto_advanced = if was_serving { self.auto_advance() } else { None };
        Ok(TicketTransition {
            ticket,
            auto_advanced,
        })
    }

    /// Removes a waiting ticket from the queue entirely.
    ///
    /// Only waiting tickets may leave — a customer already being served
    /// cannot silently vanish from the shop's perspective. The token
    /// number is never reused; the sequencer journal keeps the audit
    /// history of the departed ticket.
    ///
    /// # Errors
    ///
    /// - [`ShopQueueError::TicketNotFound`] if the ticket does not exist
    /// - [`ShopQueueError::InvalidTransition`] if it is not waiting
    pub fn leave(&mut self, ticket_id: TicketId) -> Result<Ticket, ShopQueueError> {
        let idx = self
            .tickets
            .iter()
            .position(|t| t.id == ticket_id)
            .ok_or(ShopQueueError::TicketNotFound(ticket_id))?;

        if self.tickets[idx].status != TicketStatus::Waiting {
            return Err(ShopQueueError::InvalidTransition {
                ticket_id,
                status: self.tickets[idx].status,
                operation: "leave".to_string(),
            });
        }

        Ok(self.tickets.remove(idx))
    }

    /// Returns a consistent snapshot of the live queue.
    ///
    /// Ordering: serving tickets first, then waiting, each group ascending
    /// by `(joined_at_ns, token_number)`. Positions are 1-based. A waiting
    /// ticket's estimate is the sum of the waiting durations strictly
    /// ahead of it divided by the active-server count, rounded up; a
    /// serving ticket's estimate is 0.
    #[must_use]
    pub fn snapshot(&self) -> ShopQueueSnapshot {
        ShopQueueSnapshot {
            shop_id: self.config.shop_id,
            paused: self.paused,
            active_servers: self.active_servers(),
            timestamp_ns: nanos_since_epoch(),
            entries: self.ordered_entries(),
        }
    }

    /// Returns the live queue placement of a customer's ticket.
    ///
    /// When the customer holds more than one live ticket (nothing prevents
    /// it at this layer), the earliest-joined one is reported.
    #[must_use]
    pub fn customer_status(&self, customer_id: CustomerId) -> Option<CustomerStatus> {
        let entries = self.ordered_entries();
        let own = entries
            .iter()
            .find(|e| e.ticket.customer_id == Some(customer_id))?
            .clone();
        Some(CustomerStatus {
            ticket: own.ticket,
            current_position: own.position,
            people_ahead: own.people_ahead,
            estimated_wait_minutes: own.estimated_wait_minutes,
            full_queue: entries,
        })
    }

    /// Promotes the earliest-joined waiting ticket into a freed slot.
    ///
    /// No-op while paused or while every slot is still occupied.
    fn auto_advance(&mut self) -> Option<Ticket> {
        if self.paused {
            return None;
        }
        if self.serving_count() >= self.active_servers() as usize {
            return None;
        }

        let next = self
            .tickets
            .iter_mut()
            .filter(|t| t.status == TicketStatus::Waiting)
            .min_by_key(|t| t.queue_key())?;
        next.status = TicketStatus::Serving;
        Some(next.clone())
    }

    /// Builds the live display ordering with derived placements.
    fn ordered_entries(&self) -> Vec<QueueEntry> {
        let mut live: Vec<&Ticket> = self.tickets.iter().filter(|t| t.status.is_live()).collect();
        live.sort_by_key(|t| (t.status == TicketStatus::Waiting, t.queue_key()));

        let active_servers = u64::from(self.active_servers());
        let mut waiting_minutes_ahead: u64 = 0;

        live.iter()
            .enumerate()
            .map(|(idx, ticket)| {
                let estimated_wait_minutes = match ticket.status {
                    TicketStatus::Serving => 0,
                    _ => {
                        let estimate = waiting_minutes_ahead.div_ceil(active_servers);
                        waiting_minutes_ahead += u64::from(ticket.total_minutes());
                        u32::try_from(estimate).unwrap_or(u32::MAX)
                    }
                };
                QueueEntry {
                    ticket: (*ticket).clone(),
                    position: idx + 1,
                    people_ahead: idx,
                    estimated_wait_minutes,
                }
            })
            .collect()
    }

    /// Rejects joins while the shop is paused or still a draft.
    fn ensure_accepting(&self) -> Result<(), ShopQueueError> {
        let reason = if self.paused {
            "queue is paused"
        } else if self.config.address.is_none() {
            "shop is not active yet (no address)"
        } else if self.catalog.is_empty() {
            "shop is not active yet (no services)"
        } else {
            return Ok(());
        };
        Err(ShopQueueError::ShopUnavailable {
            shop_id: self.config.shop_id,
            reason: reason.to_string(),
        })
    }
}

/// Returns the current time in nanoseconds since the Unix epoch.
#[inline]
pub(crate) fn nanos_since_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

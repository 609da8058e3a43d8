/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! # queueline-rs
//!
//! A deterministic queue sequencing engine for walk-in service shops.
//!
//! The crate implements the ordering and lifecycle rules of a live
//! wait-queue: customers (from an app) and walk-ins (entered by staff) are
//! reconciled into one ordered line per shop, tickets carry permanent
//! monotonic token numbers, and every state transition — waiting → serving
//! → completed, or a skip — is enforced by the core rather than by its
//! callers. Wait-time estimates are derived on every query from the
//! durations of the waiting tickets ahead and the shop's active-server
//! count.
//!
//! # Architecture
//!
//! - [`catalog`] — read-only reference data: services and their duration
//!   variants, resolved into selections with derived totals
//! - [`shopqueue`] — the synchronous per-shop aggregate: the ticket state
//!   machine, token assignment, ordering, wait estimates and snapshots
//! - [`sequencer`] — a single-writer loop per shop giving total ordering,
//!   monotonic sequence numbers, event listeners, an append-only
//!   [`Journal`](sequencer::journal::Journal) and deterministic replay
//! - [`engine`] — the multi-shop front door routing commands to per-shop
//!   loops; different shops proceed fully in parallel
//!
//! Transport, authentication, shop CRUD and persistence are external
//! collaborators: the core accepts commands, emits receipts, events and
//! snapshots, and does no I/O of its own.
//!
//! # Examples
//!
//! ```
//! use queueline_rs::catalog::{DurationVariant, Service, ServiceCatalog};
//! use queueline_rs::shopqueue::{CustomerId, ShopConfig, ShopId, ShopQueue, TicketId};
//!
//! let cut = DurationVariant::new("Standard", 30, 2500);
//! let cut_id = cut.id;
//! let catalog = ServiceCatalog::from_services(vec![Service::new("Haircut", vec![cut])]);
//! let config = ShopConfig::new(ShopId::new(), "Elite Cuts").with_address("123 Main Street");
//!
//! let mut queue = ShopQueue::new(config, catalog);
//! let entry = queue
//!     .join(TicketId::new(), CustomerId::new(), &[cut_id], 0)
//!     .unwrap();
//! assert_eq!(entry.ticket.token_number, 1);
//! ```

pub mod catalog;
pub mod engine;
pub mod sequencer;
pub mod shopqueue;

// Re-export main types
pub use catalog::{DurationId, DurationVariant, Selection, Service, ServiceCatalog, ServiceId};
pub use engine::{EngineError, QueueEngine};
pub use sequencer::{
    Sequencer, SequencerCommand, SequencerError, SequencerEvent, SequencerReceipt, SequencerResult,
};
pub use shopqueue::{
    CustomerId, CustomerStatus, QueueEntry, ShopConfig, ShopId, ShopQueue, ShopQueueError,
    ShopQueueSnapshot, Ticket, TicketId, TicketStatus, TicketTransition,
};

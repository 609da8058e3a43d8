/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Core Sequencer implementation.
//!
//! This module provides the main Sequencer struct that wraps a ShopQueue
//! and ensures all operations are executed in a deterministic, totally-ordered
//! sequence with monotonic sequence numbers.

use super::command::SequencerCommand;
use super::event::SequencerEvent;
use super::receipt::SequencerReceipt;
use super::result::SequencerResult;
use crate::shopqueue::queue::nanos_since_epoch;
use crate::shopqueue::{ShopId, ShopQueue};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Type alias for event listener functions.
type EventListener = Arc<dyn Fn(&SequencerEvent) + Send + Sync>;

/// A single-threaded sequencer that provides total ordering of queue
/// operations for one shop.
///
/// The Sequencer wraps a [`ShopQueue`] and ensures all operations are
/// executed in a deterministic order with monotonically increasing sequence
/// numbers: a single writer task processes all commands in order,
/// eliminating the need for locks. Queries travel the same channel, so a
/// snapshot fully precedes or fully follows any mutation on the same shop —
/// never interleaves.
///
/// # Examples
///
/// ```no_run
/// use queueline_rs::catalog::ServiceCatalog;
/// use queueline_rs::sequencer::Sequencer;
/// use queueline_rs::shopqueue::{ShopConfig, ShopId, ShopQueue};
///
/// # async fn example() {
/// let config = ShopConfig::new(ShopId::new(), "Elite Cuts");
/// let sequencer = Sequencer::new(ShopQueue::new(config, ServiceCatalog::new()));
/// let handle = sequencer.spawn();
/// // Submit commands...
/// # }
/// ```
pub struct Sequencer {
    /// The underlying shop queue.
    queue: ShopQueue,

    /// Monotonic sequence counter.
    sequence: Arc<AtomicU64>,

    /// Channel for submitting commands.
    command_tx: mpsc::Sender<(SequencerCommand, oneshot::Sender<SequencerReceipt>)>,

    /// Channel for receiving commands (used by event loop).
    command_rx: Option<mpsc::Receiver<(SequencerCommand, oneshot::Sender<SequencerReceipt>)>>,

    /// Event listeners called synchronously for each event.
    event_listeners: Vec<EventListener>,
}

impl Sequencer {
    /// Creates a new Sequencer wrapping the given ShopQueue.
    ///
    /// # Arguments
    ///
    /// * `queue` - The ShopQueue to wrap
    ///
    /// # Examples
    ///
    /// ```
    /// use queueline_rs::catalog::ServiceCatalog;
    /// use queueline_rs::sequencer::Sequencer;
    /// use queueline_rs::shopqueue::{ShopConfig, ShopId, ShopQueue};
    ///
    /// let config = ShopConfig::new(ShopId::new(), "Elite Cuts");
    /// let sequencer = Sequencer::new(ShopQueue::new(config, ServiceCatalog::new()));
    /// ```
    #[must_use]
    pub fn new(queue: ShopQueue) -> Self {
        Self::with_capacity(queue, 65536)
    }

    /// Creates a new Sequencer with a specific channel capacity.
    ///
    /// # Arguments
    ///
    /// * `queue` - The ShopQueue to wrap
    /// * `capacity` - Channel buffer size (backpressure when full)
    #[must_use]
    pub fn with_capacity(queue: ShopQueue, capacity: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(capacity);

        Self {
            queue,
            sequence: Arc::new(AtomicU64::new(1)),
            command_tx,
            command_rx: Some(command_rx),
            event_listeners: Vec::new(),
        }
    }

    /// Returns the id of the shop this sequencer serializes.
    #[inline]
    #[must_use]
    pub fn shop_id(&self) -> ShopId {
        self.queue.shop_id()
    }

    /// Registers an event listener.
    ///
    /// Listeners are called synchronously in sequence order for each event.
    /// Feeding a [`Journal`] from a listener gives a write-ahead audit
    /// trail: the event is recorded before the receipt is acknowledged.
    ///
    /// # Arguments
    ///
    /// * `listener` - Function to call for each event
    ///
    /// [`Journal`]: super::journal::Journal
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&SequencerEvent) + Send + Sync + 'static,
    {
        self.event_listeners.push(Arc::new(listener));
    }

    /// Submits a command to the sequencer.
    ///
    /// Returns a receipt containing the assigned sequence number and result.
    ///
    /// # Arguments
    ///
    /// * `command` - The command to execute
    ///
    /// # Errors
    ///
    /// Returns an error if the sequencer has been shut down.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use queueline_rs::catalog::ServiceCatalog;
    /// # use queueline_rs::sequencer::{Sequencer, SequencerCommand};
    /// # use queueline_rs::shopqueue::{ShopConfig, ShopId, ShopQueue};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ShopConfig::new(ShopId::new(), "Elite Cuts");
    /// # let sequencer = Sequencer::new(ShopQueue::new(config, ServiceCatalog::new()));
    /// let receipt = sequencer.submit(SequencerCommand::Snapshot).await?;
    /// assert!(receipt.sequence_num > 0);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(
        &self,
        command: SequencerCommand,
    ) -> Result<SequencerReceipt, SequencerError> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send((command, tx))
            .await
            .map_err(|_| SequencerError::Shutdown)?;
        rx.await.map_err(|_| SequencerError::Shutdown)
    }

    /// Spawns the sequencer event loop on a new task.
    ///
    /// Returns a handle that can be used to wait for shutdown. The loop
    /// ends when every command sender has been dropped.
    ///
    /// # Panics
    ///
    /// Panics if called more than once on the same Sequencer instance.
    #[must_use]
    pub fn spawn(mut self) -> SequencerHandle {
        let command_rx = self.command_rx.take().expect("spawn called twice");
        info!(shop_id = %self.queue.shop_id(), "sequencer spawned");

        let handle = tokio::spawn(async move {
            self.run_loop(command_rx).await;
        });

        SequencerHandle { handle }
    }

    /// Runs the main event loop (single-threaded).
    ///
    /// Receives commands, assigns sequence numbers, executes on the
    /// ShopQueue, emits events, and sends receipts.
    async fn run_loop(
        &mut self,
        mut command_rx: mpsc::Receiver<(SequencerCommand, oneshot::Sender<SequencerReceipt>)>,
    ) {
        while let Some((command, reply)) = command_rx.recv().await {
            let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
            let ts = nanos_since_epoch();

            let result = self.execute_command(&command, ts);

            match &result {
                SequencerResult::Rejected { error } => {
                    warn!(shop_id = %self.queue.shop_id(), seq, %error, "command rejected");
                }
                _ => {
                    debug!(shop_id = %self.queue.shop_id(), seq, "command applied");
                }
            }

            let event = SequencerEvent::new(seq, ts, command.clone(), result);

            for listener in &self.event_listeners {
                listener(&event);
            }

            let receipt = SequencerReceipt::new(seq, event.result);
            let _ = reply.send(receipt);
        }

        info!(shop_id = %self.queue.shop_id(), "sequencer shut down");
    }

    /// Executes a command on the underlying ShopQueue.
    ///
    /// `ts` is the nanosecond timestamp assigned to the command; ticket
    /// creation stamps it into `joined_at_ns`.
    fn execute_command(&mut self, command: &SequencerCommand, ts: u64) -> SequencerResult {
        match command {
            SequencerCommand::Join {
                ticket_id,
                customer_id,
                selection,
            } => match self.queue.join(*ticket_id, *customer_id, selection, ts) {
                Ok(entry) => SequencerResult::Joined { entry },
                Err(error) => SequencerResult::Rejected { error },
            },
            SequencerCommand::AddWalkIn {
                ticket_id,
                name,
                selection,
            } => match self.queue.add_walk_in(*ticket_id, name, selection, ts) {
                Ok(entry) => SequencerResult::WalkInAdded { entry },
                Err(error) => SequencerResult::Rejected { error },
            },
            SequencerCommand::StartServing { ticket_id } => {
                match self.queue.start_serving(*ticket_id) {
                    Ok(ticket) => SequencerResult::ServingStarted { ticket },
                    Err(error) => SequencerResult::Rejected { error },
                }
            }
            SequencerCommand::Complete { ticket_id } => match self.queue.complete(*ticket_id) {
                Ok(transition) => SequencerResult::Completed {
                    ticket: transition.ticket,
                    auto_advanced: transition.auto_advanced,
                },
                Err(error) => SequencerResult::Rejected { error },
            },
            SequencerCommand::Skip { ticket_id } => match self.queue.skip(*ticket_id) {
                Ok(transition) => SequencerResult::Skipped {
                    ticket: transition.ticket,
                    auto_advanced: transition.auto_advanced,
                },
                Err(error) => SequencerResult::Rejected { error },
            },
            SequencerCommand::Leave { ticket_id } => match self.queue.leave(*ticket_id) {
                Ok(ticket) => SequencerResult::Left { ticket },
                Err(error) => SequencerResult::Rejected { error },
            },
            SequencerCommand::SetPaused { paused } => {
                self.queue.set_paused(*paused);
                SequencerResult::PauseSet { paused: *paused }
            }
            SequencerCommand::Snapshot => SequencerResult::Snapshot {
                snapshot: self.queue.snapshot(),
            },
            SequencerCommand::CustomerStatus { customer_id } => SequencerResult::CustomerStatus {
                status: self.queue.customer_status(*customer_id),
            },
        }
    }

    /// Returns a clone of the command sender.
    ///
    /// This allows creating multiple submission handles.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<(SequencerCommand, oneshot::Sender<SequencerReceipt>)> {
        self.command_tx.clone()
    }
}

/// Handle to a spawned sequencer task.
pub struct SequencerHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl SequencerHandle {
    /// Waits for the sequencer to shut down.
    ///
    /// # Errors
    ///
    /// Returns a [`tokio::task::JoinError`] if the sequencer task panicked
    /// or was cancelled.
    pub async fn wait(self) -> Result<(), tokio::task::JoinError> {
        self.handle.await
    }
}

/// Errors that can occur when interacting with the Sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerError {
    /// The sequencer has been shut down.
    Shutdown,
}

impl std::fmt::Display for SequencerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "sequencer has been shut down"),
        }
    }
}

impl std::error::Error for SequencerError {}

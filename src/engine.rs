/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Multi-shop front door: one running sequencer per shop.
//!
//! [`QueueEngine`] owns the shop-id → sequencer routing table. Every
//! mutating operation against one shop is serialized by that shop's
//! sequencer loop; operations against different shops proceed fully in
//! parallel. The engine is cheap to share (`Arc<QueueEngine>`) across
//! however many transport tasks the deployment runs.

use crate::sequencer::{Sequencer, SequencerCommand, SequencerReceipt, SequencerResult};
use crate::shopqueue::{CustomerId, CustomerStatus, ShopId, ShopQueueSnapshot};
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Errors raised by the engine's routing layer.
///
/// Distinct from [`ShopQueueError`]: these are infrastructure-shaped
/// failures (unknown shop, stopped sequencer), not domain rejections.
///
/// [`ShopQueueError`]: crate::shopqueue::ShopQueueError
#[derive(Debug, Error)]
pub enum EngineError {
    /// No sequencer is registered for the shop.
    #[error("shop {0} is not registered")]
    ShopNotFound(ShopId),

    /// The shop's sequencer loop has stopped.
    #[error("sequencer for shop {0} has shut down")]
    Shutdown(ShopId),
}

type CommandSender = mpsc::Sender<(SequencerCommand, oneshot::Sender<SequencerReceipt>)>;

/// Routes commands to per-shop sequencer loops.
///
/// # Examples
///
/// ```no_run
/// use queueline_rs::catalog::ServiceCatalog;
/// use queueline_rs::engine::QueueEngine;
/// use queueline_rs::sequencer::Sequencer;
/// use queueline_rs::shopqueue::{ShopConfig, ShopId, ShopQueue};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = QueueEngine::new();
/// let config = ShopConfig::new(ShopId::new(), "Elite Cuts").with_address("123 Main Street");
/// let shop_id = engine.register(Sequencer::new(ShopQueue::new(config, ServiceCatalog::new())));
///
/// let snapshot = engine.snapshot(shop_id).await?;
/// assert!(snapshot.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct QueueEngine {
    shops: DashMap<ShopId, CommandSender>,
}

impl QueueEngine {
    /// Creates an engine with no registered shops.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the sequencer's event loop and registers it under its shop id.
    ///
    /// Listeners must be added to the [`Sequencer`] before registration.
    /// Re-registering a shop id replaces the previous route; the old loop
    /// drains and stops once its last sender is dropped.
    pub fn register(&self, sequencer: Sequencer) -> ShopId {
        let shop_id = sequencer.shop_id();
        let sender = sequencer.sender();
        drop(sequencer.spawn());
        self.shops.insert(shop_id, sender);
        info!(%shop_id, "shop registered with queue engine");
        shop_id
    }

    /// Returns `true` if a sequencer is registered for the shop.
    #[must_use]
    pub fn contains(&self, shop_id: ShopId) -> bool {
        self.shops.contains_key(&shop_id)
    }

    /// Returns the number of registered shops.
    #[must_use]
    pub fn shop_count(&self) -> usize {
        self.shops.len()
    }

    /// Unregisters a shop. Its sequencer loop drains in-flight commands
    /// and stops once every sender is gone. Returns `false` when the shop
    /// was not registered.
    pub fn close_shop(&self, shop_id: ShopId) -> bool {
        let removed = self.shops.remove(&shop_id).is_some();
        if removed {
            info!(%shop_id, "shop unregistered from queue engine");
        }
        removed
    }

    /// Submits a command to the shop's sequencer and waits for its receipt.
    ///
    /// Domain rejections come back inside the receipt
    /// ([`SequencerResult::Rejected`]); this method only fails on routing
    /// problems.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ShopNotFound`] if the shop is not registered
    /// - [`EngineError::Shutdown`] if the shop's loop has stopped
    pub async fn submit(
        &self,
        shop_id: ShopId,
        command: SequencerCommand,
    ) -> Result<SequencerReceipt, EngineError> {
        // Clone the sender out of the map so no shard lock is held across
        // an await point.
        let sender = {
            let entry = self
                .shops
                .get(&shop_id)
                .ok_or(EngineError::ShopNotFound(shop_id))?;
            entry.value().clone()
        };

        let (tx, rx) = oneshot::channel();
        sender
            .send((command, tx))
            .await
            .map_err(|_| EngineError::Shutdown(shop_id))?;
        rx.await.map_err(|_| EngineError::Shutdown(shop_id))
    }

    /// Reads a consistent snapshot of the shop's live queue.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    pub async fn snapshot(&self, shop_id: ShopId) -> Result<ShopQueueSnapshot, EngineError> {
        let receipt = self.submit(shop_id, SequencerCommand::Snapshot).await?;
        match receipt.result {
            SequencerResult::Snapshot { snapshot } => Ok(snapshot),
            _ => unreachable!("snapshot command always yields a snapshot result"),
        }
    }

    /// Reads a customer's live placement in the shop's queue.
    ///
    /// Returns `Ok(None)` when the customer holds no live ticket.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    pub async fn customer_status(
        &self,
        shop_id: ShopId,
        customer_id: CustomerId,
    ) -> Result<Option<CustomerStatus>, EngineError> {
        let receipt = self
            .submit(shop_id, SequencerCommand::CustomerStatus { customer_id })
            .await?;
        match receipt.result {
            SequencerResult::CustomerStatus { status } => Ok(status),
            _ => unreachable!("customer-status command always yields a status result"),
        }
    }
}

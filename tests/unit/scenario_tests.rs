use queueline_rs::catalog::{DurationId, DurationVariant, Service, ServiceCatalog};
use queueline_rs::engine::{EngineError, QueueEngine};
use queueline_rs::sequencer::{Sequencer, SequencerCommand, SequencerResult};
use queueline_rs::shopqueue::{
    CustomerId, QueueEntry, ShopConfig, ShopId, ShopQueue, ShopQueueError, TicketStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Haircut 30 min, Express cut 20 min, Beard trim 15 min.
    fn make_catalog() -> (ServiceCatalog, Vec<DurationId>) {
        let catalog = ServiceCatalog::from_services(vec![
            Service::new(
                "Haircut",
                vec![
                    DurationVariant::new("Standard", 30, 2500),
                    DurationVariant::new("Express", 20, 1800),
                ],
            ),
            Service::new("Beard Trim", vec![DurationVariant::new("Standard", 15, 1500)]),
        ]);
        let ids = catalog
            .services()
            .iter()
            .flat_map(|s| s.variants.iter().map(|v| v.id))
            .collect();
        (catalog, ids)
    }

    fn register_shop(engine: &QueueEngine, active_servers: u32) -> (ShopId, Vec<DurationId>) {
        let (catalog, ids) = make_catalog();
        let config = ShopConfig::new(ShopId::new(), "Elite Cuts")
            .with_address("123 Main Street")
            .with_active_servers(active_servers);
        let shop_id = engine.register(Sequencer::new(ShopQueue::new(config, catalog)));
        (shop_id, ids)
    }

    async fn join(engine: &QueueEngine, shop_id: ShopId, duration: DurationId) -> QueueEntry {
        let receipt = engine
            .submit(
                shop_id,
                SequencerCommand::join(CustomerId::new(), vec![duration]),
            )
            .await
            .unwrap();
        match receipt.result {
            SequencerResult::Joined { entry } => entry,
            other => panic!("join failed: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scenario_a_tokens_positions_and_waits() {
        let engine = QueueEngine::new();
        let (shop_id, ids) = register_shop(&engine, 1);

        // First customer, 30-min haircut.
        let first = join(&engine, shop_id, ids[0]).await;
        assert_eq!(first.ticket.token_number, 1);
        assert_eq!(first.ticket.status, TicketStatus::Waiting);
        assert_eq!(first.position, 1);
        assert_eq!(first.estimated_wait_minutes, 0);

        // Barber starts serving the first ticket.
        let receipt = engine
            .submit(
                shop_id,
                SequencerCommand::StartServing {
                    ticket_id: first.ticket.id,
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            receipt.result,
            SequencerResult::ServingStarted { ref ticket } if ticket.status == TicketStatus::Serving
        ));

        // Second customer, 15-min trim: nothing *waiting* ahead.
        let second = join(&engine, shop_id, ids[2]).await;
        assert_eq!(second.ticket.token_number, 2);
        assert_eq!(second.position, 2);
        assert_eq!(second.estimated_wait_minutes, 0);

        // Third customer, 20-min express: ticket 2's 15 minutes ahead.
        let third = join(&engine, shop_id, ids[1]).await;
        assert_eq!(third.ticket.token_number, 3);
        assert_eq!(third.position, 3);
        assert_eq!(third.estimated_wait_minutes, 15);
    }

    #[tokio::test]
    async fn test_scenario_b_complete_auto_advances() {
        let engine = QueueEngine::new();
        let (shop_id, ids) = register_shop(&engine, 1);

        let first = join(&engine, shop_id, ids[0]).await;
        engine
            .submit(
                shop_id,
                SequencerCommand::StartServing {
                    ticket_id: first.ticket.id,
                },
            )
            .await
            .unwrap();
        let second = join(&engine, shop_id, ids[2]).await;
        let third = join(&engine, shop_id, ids[1]).await;

        let receipt = engine
            .submit(
                shop_id,
                SequencerCommand::Complete {
                    ticket_id: first.ticket.id,
                },
            )
            .await
            .unwrap();
        match receipt.result {
            SequencerResult::Completed {
                ticket,
                auto_advanced,
            } => {
                assert_eq!(ticket.status, TicketStatus::Completed);
                assert_eq!(auto_advanced.unwrap().id, second.ticket.id);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let snapshot = engine.snapshot(shop_id).await.unwrap();
        assert_eq!(snapshot.len(), 2);
        let promoted = snapshot.entry(second.ticket.id).unwrap();
        assert_eq!(promoted.ticket.status, TicketStatus::Serving);
        assert_eq!(promoted.estimated_wait_minutes, 0);
        let waiter = snapshot.entry(third.ticket.id).unwrap();
        assert_eq!(waiter.position, 2);
        assert_eq!(waiter.estimated_wait_minutes, 0);
    }

    #[tokio::test]
    async fn test_scenario_c_pause_blocks_joins_and_starts() {
        let engine = QueueEngine::new();
        let (shop_id, ids) = register_shop(&engine, 1);

        let waiting = join(&engine, shop_id, ids[0]).await;

        engine
            .submit(shop_id, SequencerCommand::SetPaused { paused: true })
            .await
            .unwrap();

        let receipt = engine
            .submit(
                shop_id,
                SequencerCommand::join(CustomerId::new(), vec![ids[0]]),
            )
            .await
            .unwrap();
        assert!(matches!(
            receipt.result,
            SequencerResult::Rejected {
                error: ShopQueueError::ShopUnavailable { .. }
            }
        ));

        let receipt = engine
            .submit(
                shop_id,
                SequencerCommand::StartServing {
                    ticket_id: waiting.ticket.id,
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            receipt.result,
            SequencerResult::Rejected {
                error: ShopQueueError::ShopUnavailable { .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_scenario_d_walk_in_validation() {
        let engine = QueueEngine::new();
        let (shop_id, ids) = register_shop(&engine, 1);

        let receipt = engine
            .submit(shop_id, SequencerCommand::walk_in("", vec![ids[0]]))
            .await
            .unwrap();
        assert!(matches!(
            receipt.result,
            SequencerResult::Rejected {
                error: ShopQueueError::InvalidName
            }
        ));

        let receipt = engine
            .submit(shop_id, SequencerCommand::walk_in("Sam", vec![]))
            .await
            .unwrap();
        assert!(matches!(
            receipt.result,
            SequencerResult::Rejected {
                error: ShopQueueError::InvalidSelection { .. }
            }
        ));

        let receipt = engine
            .submit(shop_id, SequencerCommand::walk_in("Sam", vec![ids[0]]))
            .await
            .unwrap();
        assert!(matches!(
            receipt.result,
            SequencerResult::WalkInAdded { ref entry } if entry.ticket.is_walk_in
        ));
    }

    #[tokio::test]
    async fn test_shops_are_independent() {
        let engine = QueueEngine::new();
        let (first_shop, first_ids) = register_shop(&engine, 1);
        let (second_shop, second_ids) = register_shop(&engine, 1);
        assert_eq!(engine.shop_count(), 2);

        // Pausing one shop leaves the other accepting.
        engine
            .submit(first_shop, SequencerCommand::SetPaused { paused: true })
            .await
            .unwrap();

        let receipt = engine
            .submit(
                second_shop,
                SequencerCommand::join(CustomerId::new(), vec![second_ids[0]]),
            )
            .await
            .unwrap();
        assert!(receipt.is_success());

        // Token counters are shop-scoped.
        engine
            .submit(first_shop, SequencerCommand::SetPaused { paused: false })
            .await
            .unwrap();
        let entry = join(&engine, first_shop, first_ids[0]).await;
        assert_eq!(entry.ticket.token_number, 1);
    }

    #[tokio::test]
    async fn test_unknown_shop_not_found() {
        let engine = QueueEngine::new();
        let result = engine.snapshot(ShopId::new()).await;
        assert!(matches!(result, Err(EngineError::ShopNotFound(_))));
    }

    #[tokio::test]
    async fn test_close_shop_stops_routing() {
        let engine = QueueEngine::new();
        let (shop_id, _ids) = register_shop(&engine, 1);

        assert!(engine.close_shop(shop_id));
        assert!(!engine.close_shop(shop_id));
        let result = engine.snapshot(shop_id).await;
        assert!(matches!(result, Err(EngineError::ShopNotFound(_))));
    }

    #[tokio::test]
    async fn test_customer_status_via_engine() {
        let engine = QueueEngine::new();
        let (shop_id, ids) = register_shop(&engine, 1);

        join(&engine, shop_id, ids[0]).await;

        let customer = CustomerId::new();
        engine
            .submit(
                shop_id,
                SequencerCommand::Join {
                    ticket_id: queueline_rs::shopqueue::TicketId::new(),
                    customer_id: customer,
                    selection: vec![ids[2]],
                },
            )
            .await
            .unwrap();

        let status = engine
            .customer_status(shop_id, customer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status.current_position, 2);
        assert_eq!(status.people_ahead, 1);
        assert_eq!(status.estimated_wait_minutes, 30);

        let absent = engine
            .customer_status(shop_id, CustomerId::new())
            .await
            .unwrap();
        assert!(absent.is_none());
    }
}

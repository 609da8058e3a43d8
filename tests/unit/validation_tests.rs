use queueline_rs::catalog::{DurationId, DurationVariant, Service, ServiceCatalog};
use queueline_rs::shopqueue::{
    CustomerId, ShopConfig, ShopId, ShopQueue, ShopQueueError, TicketId,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn make_catalog() -> ServiceCatalog {
        ServiceCatalog::from_services(vec![
            Service::new(
                "Haircut",
                vec![
                    DurationVariant::new("Standard", 30, 2500),
                    DurationVariant::new("Express", 20, 1800),
                ],
            ),
            Service::new("Beard Trim", vec![DurationVariant::new("Standard", 15, 1500)]),
        ])
    }

    fn make_active_queue() -> (ShopQueue, Vec<DurationId>) {
        let catalog = make_catalog();
        let ids = catalog
            .services()
            .iter()
            .flat_map(|s| s.variants.iter().map(|v| v.id))
            .collect();
        let config = ShopConfig::new(ShopId::new(), "Elite Cuts").with_address("123 Main Street");
        (ShopQueue::new(config, catalog), ids)
    }

    // --- Selection validation ---

    #[test]
    fn test_empty_selection_rejected_on_join() {
        let (mut queue, _ids) = make_active_queue();
        let result = queue.join(TicketId::new(), CustomerId::new(), &[], 10);
        assert!(matches!(
            result,
            Err(ShopQueueError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_empty_selection_rejected_on_walk_in() {
        let (mut queue, _ids) = make_active_queue();
        let result = queue.add_walk_in(TicketId::new(), "Sam", &[], 10);
        assert!(matches!(
            result,
            Err(ShopQueueError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_unknown_duration_rejected() {
        let (mut queue, _ids) = make_active_queue();
        let unknown = DurationId::new();
        let result = queue.join(TicketId::new(), CustomerId::new(), &[unknown], 10);
        assert!(matches!(
            result,
            Err(ShopQueueError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_mixed_known_and_unknown_durations_rejected() {
        let (mut queue, ids) = make_active_queue();
        let result = queue.join(
            TicketId::new(),
            CustomerId::new(),
            &[ids[0], DurationId::new()],
            10,
        );
        assert!(matches!(
            result,
            Err(ShopQueueError::InvalidSelection { .. })
        ));
        // No ticket was created by the failed join.
        assert_eq!(queue.live_count(), 0);
    }

    #[test]
    fn test_valid_selection_accepted() {
        let (mut queue, ids) = make_active_queue();
        let result = queue.join(TicketId::new(), CustomerId::new(), &[ids[0], ids[2]], 10);
        assert!(result.is_ok());
    }

    // --- Walk-in name validation ---

    #[test]
    fn test_blank_walk_in_name_rejected() {
        let (mut queue, ids) = make_active_queue();
        let result = queue.add_walk_in(TicketId::new(), "", &[ids[0]], 10);
        assert!(matches!(result, Err(ShopQueueError::InvalidName)));
    }

    #[test]
    fn test_whitespace_walk_in_name_rejected() {
        let (mut queue, ids) = make_active_queue();
        let result = queue.add_walk_in(TicketId::new(), "   ", &[ids[0]], 10);
        assert!(matches!(result, Err(ShopQueueError::InvalidName)));
    }

    #[test]
    fn test_walk_in_name_is_trimmed() {
        let (mut queue, ids) = make_active_queue();
        let entry = queue
            .add_walk_in(TicketId::new(), "  David Wilson ", &[ids[0]], 10)
            .unwrap();
        assert_eq!(entry.ticket.display_name.as_deref(), Some("David Wilson"));
    }

    // --- Shop availability ---

    #[test]
    fn test_draft_shop_without_address_rejects_join() {
        let catalog = make_catalog();
        let id = catalog.services()[0].variants[0].id;
        let config = ShopConfig::new(ShopId::new(), "Fresh Fades");
        let mut queue = ShopQueue::new(config, catalog);

        let result = queue.join(TicketId::new(), CustomerId::new(), &[id], 10);
        assert!(matches!(result, Err(ShopQueueError::ShopUnavailable { .. })));
    }

    #[test]
    fn test_draft_shop_without_services_rejects_join() {
        let config = ShopConfig::new(ShopId::new(), "Fresh Fades").with_address("9 Side Street");
        let mut queue = ShopQueue::new(config, ServiceCatalog::new());

        let result = queue.join(TicketId::new(), CustomerId::new(), &[DurationId::new()], 10);
        assert!(matches!(result, Err(ShopQueueError::ShopUnavailable { .. })));
    }

    #[test]
    fn test_paused_shop_rejects_join_and_walk_in() {
        let (mut queue, ids) = make_active_queue();
        queue.set_paused(true);

        assert!(matches!(
            queue.join(TicketId::new(), CustomerId::new(), &[ids[0]], 10),
            Err(ShopQueueError::ShopUnavailable { .. })
        ));
        assert!(matches!(
            queue.add_walk_in(TicketId::new(), "Sam", &[ids[0]], 20),
            Err(ShopQueueError::ShopUnavailable { .. })
        ));
    }

    #[test]
    fn test_resumed_shop_accepts_again() {
        let (mut queue, ids) = make_active_queue();
        queue.set_paused(true);
        queue.set_paused(false);

        let result = queue.join(TicketId::new(), CustomerId::new(), &[ids[0]], 10);
        assert!(result.is_ok());
    }

    // --- Derived totals ---

    #[test]
    fn test_totals_always_recomputed_from_selection() {
        let (mut queue, ids) = make_active_queue();
        let entry = queue
            .join(TicketId::new(), CustomerId::new(), &[ids[0], ids[1], ids[2]], 10)
            .unwrap();

        assert_eq!(entry.ticket.total_minutes(), 30 + 20 + 15);
        assert_eq!(entry.ticket.total_price_cents(), 2500 + 1800 + 1500);
        assert_eq!(
            entry.ticket.selection.total_minutes(),
            entry.ticket.total_minutes()
        );
    }

    // --- Error display ---

    #[test]
    fn test_unknown_duration_error_mentions_id() {
        let (mut queue, _ids) = make_active_queue();
        let unknown = DurationId::new();
        let err = queue
            .join(TicketId::new(), CustomerId::new(), &[unknown], 10)
            .unwrap_err();
        let msg = format!("{err}");
        assert!(
            msg.contains(&unknown.to_string()),
            "Error message should name the unknown id: {msg}"
        );
    }

    #[test]
    fn test_not_found_error_mentions_ticket() {
        let (mut queue, _ids) = make_active_queue();
        let missing = TicketId::new();
        let err = queue.start_serving(missing).unwrap_err();
        let msg = format!("{err}");
        assert!(
            msg.contains(&missing.to_string()),
            "Error message should name the ticket: {msg}"
        );
    }

    #[test]
    fn test_invalid_transition_error_mentions_status() {
        let (mut queue, ids) = make_active_queue();
        let id = TicketId::new();
        queue.join(id, CustomerId::new(), &[ids[0]], 10).unwrap();
        queue.start_serving(id).unwrap();

        let err = queue.start_serving(id).unwrap_err();
        let msg = format!("{err}");
        assert!(
            msg.contains("serving"),
            "Error message should mention current status: {msg}"
        );
    }
}

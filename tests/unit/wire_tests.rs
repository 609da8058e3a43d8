use queueline_rs::catalog::{DurationVariant, Service, ServiceCatalog};
use queueline_rs::shopqueue::{
    CustomerId, ShopConfig, ShopId, ShopQueue, TicketId, TicketStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn make_queue() -> (ShopQueue, queueline_rs::catalog::DurationId) {
        let catalog = ServiceCatalog::from_services(vec![Service::new(
            "Haircut",
            vec![DurationVariant::new("Standard", 30, 2500)],
        )]);
        let duration = catalog.services()[0].variants[0].id;
        let config = ShopConfig::new(ShopId::new(), "Elite Cuts").with_address("123 Main Street");
        (ShopQueue::new(config, catalog), duration)
    }

    // --- Status translation at the boundary ---

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(TicketStatus::Waiting).unwrap(),
            "WAITING"
        );
        assert_eq!(
            serde_json::to_value(TicketStatus::Serving).unwrap(),
            "SERVING"
        );
        assert_eq!(
            serde_json::to_value(TicketStatus::Completed).unwrap(),
            "COMPLETED"
        );
        assert_eq!(
            serde_json::to_value(TicketStatus::Skipped).unwrap(),
            "SKIPPED"
        );
    }

    #[test]
    fn test_status_round_trips_from_wire() {
        let status: TicketStatus = serde_json::from_str("\"SERVING\"").unwrap();
        assert_eq!(status, TicketStatus::Serving);
    }

    #[test]
    fn test_status_displays_lowercase_for_logs() {
        assert_eq!(TicketStatus::Waiting.to_string(), "waiting");
        assert_eq!(TicketStatus::Skipped.to_string(), "skipped");
    }

    // --- Response field names match the client contract ---

    #[test]
    fn test_queue_entry_field_names() {
        let (mut queue, duration) = make_queue();
        let entry = queue
            .join(TicketId::new(), CustomerId::new(), &[duration], 10)
            .unwrap();

        let value = serde_json::to_value(&entry).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("position"));
        assert!(object.contains_key("peopleAhead"));
        assert!(object.contains_key("estimatedWaitTime"));

        let ticket = object["ticket"].as_object().unwrap();
        assert!(ticket.contains_key("tokenNumber"));
        assert!(ticket.contains_key("isWalkIn"));
        assert!(ticket.contains_key("joinedAtNs"));
        assert_eq!(ticket["status"], "WAITING");
        assert_eq!(ticket["tokenNumber"], 1);
    }

    #[test]
    fn test_customer_status_field_names() {
        let (mut queue, duration) = make_queue();
        let customer = CustomerId::new();
        queue
            .join(TicketId::new(), customer, &[duration], 10)
            .unwrap();

        let status = queue.customer_status(customer).unwrap();
        let value = serde_json::to_value(&status).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("currentPosition"));
        assert!(object.contains_key("peopleAhead"));
        assert!(object.contains_key("estimatedWaitTime"));
        assert!(object.contains_key("fullQueue"));
        assert_eq!(object["fullQueue"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_snapshot_serializes_and_round_trips() {
        let (mut queue, duration) = make_queue();
        queue
            .join(TicketId::new(), CustomerId::new(), &[duration], 10)
            .unwrap();

        let snapshot = queue.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: queueline_rs::shopqueue::ShopQueueSnapshot =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_selection_serializes_per_item_pricing() {
        let (mut queue, duration) = make_queue();
        let entry = queue
            .join(TicketId::new(), CustomerId::new(), &[duration], 10)
            .unwrap();

        let value = serde_json::to_value(&entry.ticket.selection).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["serviceName"], "Haircut");
        assert_eq!(items[0]["minutes"], 30);
        assert_eq!(items[0]["priceCents"], 2500);
    }
}

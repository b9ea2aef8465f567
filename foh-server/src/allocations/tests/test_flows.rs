use super::*;
use shared::models::AllocationKind;

// ========================================================================
// Total consistency under line-item mutation
// ========================================================================

#[tokio::test]
async fn total_follows_every_item_mutation() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let burger = seed_menu_item(&db, "Burger", 850.0).await;
    let soup = seed_menu_item(&db, "Soup", 350.0).await;

    let view = service
        .create(order_req(table_id, vec![item(burger, 2), item(soup, 1)]))
        .await
        .unwrap();
    assert_eq!(view.allocation.total_amount, 2050.0);
    assert_eq!(view.items.len(), 2);

    let burger_line = view.items.iter().find(|i| i.menu_item_id == burger).unwrap();
    let soup_line = view.items.iter().find(|i| i.menu_item_id == soup).unwrap();
    assert_eq!(burger_line.subtotal, 1700.0);

    service
        .update_item_quantity(burger_line.id, 3)
        .await
        .unwrap();
    let view = service.get(view.allocation.id).await.unwrap();
    assert_eq!(view.allocation.total_amount, 3150.0);

    service.remove_item(soup_line.id).await.unwrap();
    let view = service.get(view.allocation.id).await.unwrap();
    assert_eq!(view.allocation.total_amount, 2550.0);
    assert_eq!(view.items.len(), 1);
}

#[tokio::test]
async fn empty_order_has_zero_total() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;

    let view = service.create(order_req(table_id, vec![])).await.unwrap();
    assert_eq!(view.allocation.total_amount, 0.0);
    assert_eq!(view.allocation.status, AllocationStatus::Pending);
    assert!(view.allocation.reference.starts_with("RO-"));
}

#[tokio::test]
async fn unit_price_is_snapshotted_at_insert() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let dish = seed_menu_item(&db, "Risotto", 850.0).await;

    let view = service
        .create(order_req(table_id, vec![item(dish, 2)]))
        .await
        .unwrap();
    let first_line = view.items[0].id;

    // Catalog price changes after the first line was quoted
    menu_item::update(
        db.write(),
        dish,
        shared::models::MenuItemUpdate {
            name: None,
            description: None,
            price: Some(999.0),
            category: None,
            is_available: None,
            preparation_minutes: None,
            image_url: None,
            ingredients: None,
        },
    )
    .await
    .unwrap();

    // New lines snapshot the new price, the old line keeps its quote
    let second = service
        .add_item(view.allocation.id, item(dish, 1))
        .await
        .unwrap();
    assert_eq!(second.unit_price, 999.0);

    let updated = service.update_item_quantity(first_line, 3).await.unwrap();
    assert_eq!(updated.unit_price, 850.0);
    assert_eq!(updated.subtotal, 2550.0);

    let view = service.get(view.allocation.id).await.unwrap();
    assert_eq!(view.allocation.total_amount, 2550.0 + 999.0);
}

#[tokio::test]
async fn invalid_quantities_are_rejected() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let dish = seed_menu_item(&db, "Salad", 400.0).await;

    let view = service
        .create(order_req(table_id, vec![item(dish, 1)]))
        .await
        .unwrap();

    let err = service
        .add_item(view.allocation.id, item(dish, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::InvalidQuantity(0)));

    let line = view.items[0].id;
    let err = service.update_item_quantity(line, -1).await.unwrap_err();
    assert!(matches!(err, AllocationError::InvalidQuantity(-1)));

    // Neither failed mutation may have touched the total
    let view = service.get(view.allocation.id).await.unwrap();
    assert_eq!(view.allocation.total_amount, 400.0);
}

#[tokio::test]
async fn unavailable_menu_item_cannot_be_ordered() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let dish = seed_menu_item(&db, "Oysters", 1200.0).await;
    menu_item::set_availability(db.write(), dish, false)
        .await
        .unwrap();

    let err = service
        .create(order_req(table_id, vec![item(dish, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::MenuItemUnavailable(_)));
}

#[tokio::test]
async fn failed_creation_leaves_no_partial_state() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let dish = seed_menu_item(&db, "Pasta", 600.0).await;

    // Second line references a menu item that does not exist; the whole
    // creation must roll back
    let err = service
        .create(order_req(table_id, vec![item(dish, 1), item(999, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::MenuItemNotFound(999)));

    let table = dining_table::find_by_id(db.read(), table_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table.status, TableStatus::Available);

    let allocations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM allocation")
        .fetch_one(db.read())
        .await
        .unwrap();
    assert_eq!(allocations, 0);
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM allocation_item")
        .fetch_one(db.read())
        .await
        .unwrap();
    assert_eq!(items, 0);
}

// ========================================================================
// Lifecycle
// ========================================================================

#[tokio::test]
async fn order_walks_the_declared_lifecycle() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let view = service.create(order_req(table_id, vec![])).await.unwrap();
    let id = view.allocation.id;

    complete_order(&service, id).await;
    let view = service.get(id).await.unwrap();
    assert_eq!(view.allocation.status, AllocationStatus::Completed);
}

#[tokio::test]
async fn stage_skips_are_rejected_and_leave_status_unchanged() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let view = service.create(order_req(table_id, vec![])).await.unwrap();
    let id = view.allocation.id;

    let err = service
        .change_status(id, AllocationStatus::Ready)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AllocationError::IllegalTransition {
            from: AllocationStatus::Pending,
            to: AllocationStatus::Ready,
        }
    ));
    let view = service.get(id).await.unwrap();
    assert_eq!(view.allocation.status, AllocationStatus::Pending);
}

#[tokio::test]
async fn terminal_orders_are_frozen() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let dish = seed_menu_item(&db, "Stew", 700.0).await;
    let view = service
        .create(order_req(table_id, vec![item(dish, 1)]))
        .await
        .unwrap();
    let id = view.allocation.id;

    complete_order(&service, id).await;

    // No transition out of COMPLETED, not even a cancel
    for requested in [
        AllocationStatus::Preparing,
        AllocationStatus::Pending,
        AllocationStatus::Cancelled,
    ] {
        let err = service.change_status(id, requested).await.unwrap_err();
        assert!(matches!(err, AllocationError::IllegalTransition { .. }));
    }
    let view = service.get(id).await.unwrap();
    assert_eq!(view.allocation.status, AllocationStatus::Completed);

    // And its items can no longer be touched
    let err = service.add_item(id, item(dish, 1)).await.unwrap_err();
    assert!(matches!(err, AllocationError::InvalidInput(_)));
}

#[tokio::test]
async fn status_changes_stamp_updated_at() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let view = service.create(order_req(table_id, vec![])).await.unwrap();
    let before = view.allocation.updated_at;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let view = service
        .change_status(view.allocation.id, AllocationStatus::Confirmed)
        .await
        .unwrap();
    assert!(view.allocation.updated_at > before);
}

// ========================================================================
// Table occupancy
// ========================================================================

#[tokio::test]
async fn creating_an_order_occupies_the_table() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 5, 4).await;
    service.create(order_req(table_id, vec![])).await.unwrap();

    let table = dining_table::find_by_id(db.read(), table_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table.status, TableStatus::Occupied);

    // The table is held: a second order must be refused
    let err = service.create(order_req(table_id, vec![])).await.unwrap_err();
    assert!(matches!(err, AllocationError::ResourceUnavailable(_)));
}

#[tokio::test]
async fn cancelling_an_order_frees_the_table() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 5, 4).await;
    let view = service.create(order_req(table_id, vec![])).await.unwrap();

    service
        .change_status(view.allocation.id, AllocationStatus::Cancelled)
        .await
        .unwrap();
    let table = dining_table::find_by_id(db.read(), table_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(table.status, TableStatus::Available);

    // And it can be seated again
    service.create(order_req(table_id, vec![])).await.unwrap();
}

#[tokio::test]
async fn party_larger_than_the_table_is_refused() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 2, 4).await;

    let mut req = order_req(table_id, vec![]);
    req.party_size = Some(6);
    let err = service.create(req).await.unwrap_err();
    assert!(matches!(
        err,
        AllocationError::CapacityExceeded {
            requested: 6,
            capacity: 4,
        }
    ));
}

// ========================================================================
// Venue bookings
// ========================================================================

#[tokio::test]
async fn venue_booking_scenario() {
    let (db, service) = test_service().await;
    let venue_id = seed_venue(&db, "V1", 50).await;
    let day = date("2024-06-01");

    // 40 attendees fit: booked, immediately CONFIRMED
    let view = service
        .create(booking_req(venue_id, day, 40))
        .await
        .unwrap();
    assert_eq!(view.allocation.status, AllocationStatus::Confirmed);
    assert_eq!(view.allocation.window_date.as_deref(), Some("2024-06-01"));
    assert!(view.allocation.reference.starts_with("EB-"));

    // Same slot again: conflict
    let err = service
        .create(booking_req(venue_id, day, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::SlotAlreadyBooked { .. }));

    // Over capacity on a different date: capacity wins before anything else
    let err = service
        .create(booking_req(venue_id, date("2024-06-02"), 60))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AllocationError::CapacityExceeded {
            requested: 60,
            capacity: 50,
        }
    ));

    // A different date is free
    service
        .create(booking_req(venue_id, date("2024-06-02"), 10))
        .await
        .unwrap();
}

#[tokio::test]
async fn capacity_is_checked_before_the_slot() {
    let (db, service) = test_service().await;
    let venue_id = seed_venue(&db, "Hall", 50).await;
    let day = date("2024-06-01");
    service
        .create(booking_req(venue_id, day, 40))
        .await
        .unwrap();

    // Oversized party on an already-taken date reports the capacity
    // problem, matching the checker's declared ordering
    let err = service
        .create(booking_req(venue_id, day, 60))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::CapacityExceeded { .. }));
}

#[tokio::test]
async fn cancelled_booking_releases_the_slot() {
    let (db, service) = test_service().await;
    let venue_id = seed_venue(&db, "Garden", 80).await;
    let day = date("2024-07-15");

    let view = service
        .create(booking_req(venue_id, day, 30))
        .await
        .unwrap();
    service
        .change_status(view.allocation.id, AllocationStatus::Cancelled)
        .await
        .unwrap();

    // Slot is free again
    service.create(booking_req(venue_id, day, 30)).await.unwrap();
}

#[tokio::test]
async fn unknown_resources_are_reported() {
    let (_db, service) = test_service().await;
    let err = service.create(order_req(42, vec![])).await.unwrap_err();
    assert!(matches!(
        err,
        AllocationError::ResourceNotFound { kind: "Table", id: 42 }
    ));

    let err = service
        .create(booking_req(42, date("2024-06-01"), 10))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AllocationError::ResourceNotFound { kind: "Venue", id: 42 }
    ));
}

// ========================================================================
// Deletion
// ========================================================================

#[tokio::test]
async fn delete_cascades_items_and_spares_other_aggregates() {
    let (db, service) = test_service().await;
    let t1 = seed_table(&db, 1, 4).await;
    let t2 = seed_table(&db, 2, 4).await;
    let dish = seed_menu_item(&db, "Curry", 500.0).await;

    let first = service
        .create(order_req(t1, vec![item(dish, 2)]))
        .await
        .unwrap();
    let second = service
        .create(order_req(t2, vec![item(dish, 3)]))
        .await
        .unwrap();

    service.delete(first.allocation.id).await.unwrap();

    let err = service.get(first.allocation.id).await.unwrap_err();
    assert!(matches!(err, AllocationError::NotFound(_)));

    // No orphan rows
    let orphans: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM allocation_item WHERE allocation_id = ?")
            .bind(first.allocation.id)
            .fetch_one(db.read())
            .await
            .unwrap();
    assert_eq!(orphans, 0);

    // The deleted order's table is free again, the other untouched
    let table = dining_table::find_by_id(db.read(), t1).await.unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Available);
    let view = service.get(second.allocation.id).await.unwrap();
    assert_eq!(view.allocation.total_amount, 1500.0);
    assert_eq!(view.items.len(), 1);
}

// ========================================================================
// Listing and lookups
// ========================================================================

#[tokio::test]
async fn list_separates_kinds_and_filters_by_status() {
    let (db, service) = test_service().await;
    let table_id = seed_table(&db, 1, 4).await;
    let venue_id = seed_venue(&db, "Terrace", 60).await;

    let order = service.create(order_req(table_id, vec![])).await.unwrap();
    service
        .create(booking_req(venue_id, date("2024-09-01"), 20))
        .await
        .unwrap();

    let orders = service
        .list(AllocationKind::TableOrder, None, None)
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    let bookings = service
        .list(AllocationKind::VenueEvent, None, None)
        .await
        .unwrap();
    assert_eq!(bookings.len(), 1);

    let pending = service
        .list(AllocationKind::TableOrder, Some(AllocationStatus::Pending), None)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    let confirmed = service
        .list(AllocationKind::TableOrder, Some(AllocationStatus::Confirmed), None)
        .await
        .unwrap();
    assert!(confirmed.is_empty());

    let by_reference = service
        .get_by_reference(&order.allocation.reference)
        .await
        .unwrap();
    assert_eq!(by_reference.allocation.id, order.allocation.id);
}

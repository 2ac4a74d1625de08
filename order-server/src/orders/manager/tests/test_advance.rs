use super::*;

// ========================================================================
// Happy path
// ========================================================================

#[test]
fn test_full_delivery_flow() {
    let (storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();

    let outcome = manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();
    assert_eq!(outcome.order.status, OrderStatus::Preparing);
    let offered: Vec<_> = outcome
        .available_staff
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(offered, vec!["s-1", "s-2"]);

    // out_for_delivery without staff
    let missing = manager.advance("o-1", RESTAURANT, to(OrderStatus::OutForDelivery));
    assert!(matches!(missing, Err(ManagerError::MissingStaffAssignment)));
    assert_eq!(
        storage.get_order("o-1").unwrap().unwrap().status,
        OrderStatus::Preparing
    );

    let outcome = manager
        .advance(
            "o-1",
            RESTAURANT,
            StatusUpdate {
                status: OrderStatus::OutForDelivery,
                reason: None,
                delivery_staff_id: Some("s-1".into()),
            },
        )
        .unwrap();
    assert_eq!(outcome.order.assigned_staff_id.as_deref(), Some("s-1"));
    assert!(outcome.available_staff.is_none());
    assert!(outcome.order.staff_assignment_consistent());
    assert!(staff(&storage, "s-1").delivery_assigned);

    let outcome = manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Delivered))
        .unwrap();
    assert_eq!(outcome.order.status, OrderStatus::Delivered);
    assert!(outcome.order.assigned_staff_id.is_none());
    let s1 = staff(&storage, "s-1");
    assert!(s1.availability);
    assert!(!s1.delivery_assigned);
}

#[test]
fn test_preparing_straight_to_delivered() {
    let (_storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();

    let outcome = manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Delivered))
        .unwrap();
    assert_eq!(outcome.order.status, OrderStatus::Delivered);
    assert!(outcome.order.assigned_staff_id.is_none());
}

// ========================================================================
// Cancellation
// ========================================================================

#[test]
fn test_cancel_requires_reason() {
    let (storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    dispatch(&manager, "o-1", "s-1");

    for reason in [None, Some("   ".to_string())] {
        let result = manager.advance(
            "o-1",
            RESTAURANT,
            StatusUpdate {
                status: OrderStatus::Cancelled,
                reason,
                delivery_staff_id: None,
            },
        );
        assert!(matches!(result, Err(ManagerError::MissingCancellationReason)));
    }

    // Rejected cancel never touched the staff member
    assert!(staff(&storage, "s-1").delivery_assigned);
    assert_eq!(
        storage.get_order("o-1").unwrap().unwrap().status,
        OrderStatus::OutForDelivery
    );
}

#[test]
fn test_cancel_out_for_delivery_releases_staff() {
    let (storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    dispatch(&manager, "o-1", "s-2");

    let outcome = manager
        .advance(
            "o-1",
            RESTAURANT,
            StatusUpdate {
                status: OrderStatus::Cancelled,
                reason: Some("Customer unreachable".into()),
                delivery_staff_id: None,
            },
        )
        .unwrap();
    assert_eq!(outcome.order.status, OrderStatus::Cancelled);
    assert_eq!(
        outcome.order.cancellation_reason.as_deref(),
        Some("Customer unreachable")
    );
    assert!(outcome.order.assigned_staff_id.is_none());
    assert!(staff(&storage, "s-2").is_free());
}

#[test]
fn test_release_failure_does_not_block_terminal_transition() {
    let (storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    dispatch(&manager, "o-1", "s-1");

    // Staff record vanishes behind the allocator's back
    storage
        .update_restaurant(RESTAURANT, |r| {
            r.delivery_staff.retain(|s| s.id != "s-1");
            Ok::<_, ManagerError>(())
        })
        .unwrap();

    let outcome = manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Delivered))
        .unwrap();
    assert_eq!(outcome.order.status, OrderStatus::Delivered);
    assert!(outcome.order.assigned_staff_id.is_none());
}

// ========================================================================
// Rejections
// ========================================================================

#[test]
fn test_invalid_edges_rejected() {
    let (_storage, manager) = create_test_manager();
    manager.create(&test_order("pending", OrderStatus::Pending)).unwrap();
    manager.create(&test_order("paid", OrderStatus::Paid)).unwrap();

    // Restaurant cannot mark an order paid
    assert!(matches!(
        manager.advance("pending", RESTAURANT, to(OrderStatus::Paid)),
        Err(ManagerError::InvalidTransition(InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Paid
        }))
    ));
    // No skipping ahead
    assert!(matches!(
        manager.advance("pending", RESTAURANT, to(OrderStatus::Preparing)),
        Err(ManagerError::InvalidTransition(_))
    ));
    // No self loop
    assert!(matches!(
        manager.advance("paid", RESTAURANT, to(OrderStatus::Paid)),
        Err(ManagerError::InvalidTransition(_))
    ));
}

#[test]
fn test_terminal_orders_are_frozen() {
    let (_storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();
    manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Delivered))
        .unwrap();

    for status in OrderStatus::ALL {
        assert!(manager.advance("o-1", RESTAURANT, to(status)).is_err());
    }
}

#[test]
fn test_foreign_restaurant_sees_not_found() {
    let (_storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();

    assert!(matches!(
        manager.advance("o-1", "r-2", to(OrderStatus::Preparing)),
        Err(ManagerError::OrderNotFound(_))
    ));
    assert!(matches!(
        manager.advance("ghost", RESTAURANT, to(OrderStatus::Preparing)),
        Err(ManagerError::OrderNotFound(_))
    ));
}

#[test]
fn test_busy_staff_cannot_take_second_order() {
    let (storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    manager.create(&test_order("o-2", OrderStatus::Paid)).unwrap();
    dispatch(&manager, "o-1", "s-1");

    manager
        .advance("o-2", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();
    let result = manager.advance(
        "o-2",
        RESTAURANT,
        StatusUpdate {
            status: OrderStatus::OutForDelivery,
            reason: None,
            delivery_staff_id: Some("s-1".into()),
        },
    );
    assert!(matches!(
        result,
        Err(ManagerError::Allocation(AllocationError::StaffUnavailable(_)))
    ));
    let o2 = storage.get_order("o-2").unwrap().unwrap();
    assert_eq!(o2.status, OrderStatus::Preparing);
    assert!(o2.assigned_staff_id.is_none());
}

#[test]
fn test_unknown_staff_rejected() {
    let (_storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();
    let result = manager.advance(
        "o-1",
        RESTAURANT,
        StatusUpdate {
            status: OrderStatus::OutForDelivery,
            reason: None,
            delivery_staff_id: Some("ghost".into()),
        },
    );
    assert!(matches!(
        result,
        Err(ManagerError::Allocation(AllocationError::StaffNotFound(_)))
    ));
}

// ========================================================================
// Concurrency
// ========================================================================

#[test]
fn test_concurrent_dispatch_claims_staff_once() {
    use std::sync::Arc;
    use std::thread;

    let (storage, manager) = create_test_manager();
    let manager = Arc::new(manager);
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();

    let handles: Vec<_> = ["s-1", "s-2"]
        .into_iter()
        .map(|staff_id| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                manager.advance(
                    "o-1",
                    RESTAURANT,
                    StatusUpdate {
                        status: OrderStatus::OutForDelivery,
                        reason: None,
                        delivery_staff_id: Some(staff_id.to_string()),
                    },
                )
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    // Loser either lost the conditional write or saw the order already moved on
    assert!(results.iter().any(|r| matches!(
        r,
        Err(ManagerError::ConcurrentModification(_)) | Err(ManagerError::InvalidTransition(_))
    )));

    // The loser gave its staff member back
    let order = storage.get_order("o-1").unwrap().unwrap();
    let winner = order.assigned_staff_id.unwrap();
    let loser = if winner == "s-1" { "s-2" } else { "s-1" };
    assert!(staff(&storage, &winner).delivery_assigned);
    assert!(staff(&storage, loser).is_free());
}

#[test]
fn test_status_changed_after_load_is_rejected() {
    let (storage, manager) = create_test_manager();
    manager.create(&test_order("o-1", OrderStatus::Paid)).unwrap();
    manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();
    let snapshot = manager.get_for_restaurant("o-1", RESTAURANT).unwrap();

    // Delivered by another request before this one writes
    manager
        .advance("o-1", RESTAURANT, to(OrderStatus::Delivered))
        .unwrap();
    let stored = storage.get_order("o-1").unwrap().unwrap();

    let result = manager.advance_from(
        &snapshot,
        StatusUpdate {
            status: OrderStatus::OutForDelivery,
            reason: None,
            delivery_staff_id: Some("s-2".to_string()),
        },
    );
    assert!(matches!(result, Err(ManagerError::ConcurrentModification(id)) if id == "o-1"));

    assert_eq!(storage.get_order("o-1").unwrap().unwrap(), stored);
    assert!(staff(&storage, "s-2").is_free());
}

#[test]
fn test_stale_cancel_keeps_staff_of_next_delivery() {
    let (storage, manager) = create_test_manager();
    manager.create(&test_order("x", OrderStatus::Paid)).unwrap();
    manager.create(&test_order("y", OrderStatus::Paid)).unwrap();
    manager.create(&test_order("z", OrderStatus::Paid)).unwrap();

    dispatch(&manager, "x", "s-1");
    let stale_x = manager.get_for_restaurant("x", RESTAURANT).unwrap();
    manager
        .advance("x", RESTAURANT, to(OrderStatus::Delivered))
        .unwrap();
    dispatch(&manager, "y", "s-1");

    let result = manager.advance_from(
        &stale_x,
        StatusUpdate {
            status: OrderStatus::Cancelled,
            reason: Some("customer unreachable".to_string()),
            delivery_staff_id: None,
        },
    );
    assert!(matches!(result, Err(ManagerError::ConcurrentModification(_))));

    let s1 = staff(&storage, "s-1");
    assert!(s1.delivery_assigned);
    assert!(!s1.availability);
    let y = storage.get_order("y").unwrap().unwrap();
    assert_eq!(y.status, OrderStatus::OutForDelivery);
    assert_eq!(y.assigned_staff_id.as_deref(), Some("s-1"));
    assert_eq!(
        storage.get_order("x").unwrap().unwrap().status,
        OrderStatus::Delivered
    );

    // s-1 stays exclusive to y
    manager
        .advance("z", RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();
    let result = manager.advance(
        "z",
        RESTAURANT,
        StatusUpdate {
            status: OrderStatus::OutForDelivery,
            reason: None,
            delivery_staff_id: Some("s-1".to_string()),
        },
    );
    assert!(matches!(
        result,
        Err(ManagerError::Allocation(AllocationError::StaffUnavailable(_)))
    ));
}

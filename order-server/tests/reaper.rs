//! Pending-order reaper against real clock offsets

mod common;

use std::time::Duration;

use common::{CUSTOMER, RESTAURANT, draft, test_state};
use order_server::PendingOrderReaper;
use order_server::core::BackgroundTasks;
use rust_decimal::Decimal;
use shared::order::{Order, OrderItem, OrderStatus, PaymentStatus};
use shared::util::now_millis;

const HOUR_MS: i64 = 60 * 60 * 1000;
const TWO_HOURS: Duration = Duration::from_secs(2 * 60 * 60);

fn order(id: &str, status: OrderStatus, created_at: i64) -> Order {
    Order {
        id: id.to_string(),
        customer_id: CUSTOMER.to_string(),
        restaurant_id: RESTAURANT.to_string(),
        items: vec![OrderItem {
            menu_item_id: "m-1".to_string(),
            quantity: 1,
            unit_price: Decimal::from(500),
        }],
        total_amount: Decimal::from(500),
        status,
        payment_status: if status == OrderStatus::Pending {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Completed
        },
        assigned_staff_id: None,
        delivery_address: "12 Park Street".to_string(),
        phone_number: "9000000000".to_string(),
        payment_intent_ref: format!("gw_{id}"),
        gateway_payment_ref: None,
        cancellation_reason: None,
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn test_three_hour_old_pending_order_is_reaped() {
    let state = test_state();
    let now = now_millis();
    state
        .storage
        .insert_order(&order("stale", OrderStatus::Pending, now - 3 * HOUR_MS))
        .unwrap();
    state
        .storage
        .insert_order(&order("paid", OrderStatus::Paid, now - 3 * HOUR_MS))
        .unwrap();
    state
        .storage
        .insert_order(&order("fresh", OrderStatus::Pending, now - HOUR_MS))
        .unwrap();

    let tasks = BackgroundTasks::new();
    let reaper = PendingOrderReaper::new(
        state.storage.clone(),
        Duration::from_secs(3600),
        TWO_HOURS,
        tasks.shutdown_token(),
    );

    let removed = reaper.sweep(now).unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].id, "stale");

    assert!(state.storage.get_order("stale").unwrap().is_none());
    assert!(state.storage.get_order("paid").unwrap().is_some());
    assert!(state.storage.get_order("fresh").unwrap().is_some());
    assert!(state.storage.find_order_by_gateway_ref("gw_stale").unwrap().is_none());
}

#[tokio::test]
async fn test_confirmation_after_reap_reports_no_order() {
    let state = test_state();
    let intent = state.payments.initiate(CUSTOMER, draft()).await.unwrap();

    let tasks = BackgroundTasks::new();
    let reaper = PendingOrderReaper::new(
        state.storage.clone(),
        Duration::from_secs(3600),
        TWO_HOURS,
        tasks.shutdown_token(),
    );
    let removed = reaper.sweep(now_millis() + 3 * HOUR_MS).unwrap();
    assert_eq!(removed.len(), 1);

    let confirmation = common::signed_confirmation(&state, &intent.gateway_order_ref, "pay_late");
    let outcome = state.payments.confirm(&confirmation).unwrap();
    assert_eq!(outcome.order_id, None);
}

#[tokio::test]
async fn test_registered_reaper_sweeps_and_stops() {
    let state = test_state();
    state
        .storage
        .insert_order(&order("stale", OrderStatus::Pending, now_millis() - 3 * HOUR_MS))
        .unwrap();

    let mut tasks = BackgroundTasks::new();
    let reaper = PendingOrderReaper::new(
        state.storage.clone(),
        Duration::from_millis(20),
        TWO_HOURS,
        tasks.shutdown_token(),
    );
    tasks.spawn("pending_order_reaper", reaper.run());

    let mut reaped = false;
    for _ in 0..100 {
        if state.storage.get_order("stale").unwrap().is_none() {
            reaped = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(reaped);

    tokio::time::timeout(Duration::from_secs(5), tasks.shutdown())
        .await
        .unwrap();
}

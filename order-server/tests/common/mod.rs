//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use order_server::payments::LocalGateway;
use order_server::{Config, ServerState, Storage};
use rust_decimal::Decimal;
use shared::models::{DeliveryStaff, Restaurant};
use shared::order::{OrderDraft, OrderLineInput, PaymentConfirmation};

pub const RESTAURANT: &str = "r-1";
pub const OTHER_RESTAURANT: &str = "r-2";
pub const CUSTOMER: &str = "c-1";

/// In-memory state with two restaurants; `r-1` has staff `s-1` and `s-2`
pub fn test_state() -> ServerState {
    let storage = Storage::open_in_memory().unwrap();

    let mut restaurant = Restaurant::new(RESTAURANT, "Spice Hub", 20, 0);
    restaurant
        .delivery_staff
        .push(DeliveryStaff::new("s-1", "Ravi", "P-100", 0));
    restaurant
        .delivery_staff
        .push(DeliveryStaff::new("s-2", "Meena", "P-200", 0));
    storage.insert_restaurant(&restaurant).unwrap();
    storage
        .insert_restaurant(&Restaurant::new(OTHER_RESTAURANT, "Other Kitchen", 10, 0))
        .unwrap();

    ServerState::new(
        Config::for_work_dir("./target/test-work-dir"),
        storage,
        Arc::new(LocalGateway::new()),
    )
}

/// 2 items totalling 500
pub fn draft() -> OrderDraft {
    OrderDraft {
        amount: Decimal::from(500),
        items: vec![
            OrderLineInput {
                menu_item_id: "m-1".to_string(),
                restaurant_id: RESTAURANT.to_string(),
                quantity: 2,
                price: Decimal::from(150),
            },
            OrderLineInput {
                menu_item_id: "m-2".to_string(),
                restaurant_id: RESTAURANT.to_string(),
                quantity: 1,
                price: Decimal::from(200),
            },
        ],
        delivery_address: "12 Park Street, Kolkata".to_string(),
        phone_number: "+919000000000".to_string(),
    }
}

/// Callback the gateway would send for a successful payment
pub fn signed_confirmation(
    state: &ServerState,
    gateway_order_ref: &str,
    gateway_payment_ref: &str,
) -> PaymentConfirmation {
    PaymentConfirmation {
        gateway_order_ref: gateway_order_ref.to_string(),
        gateway_payment_ref: gateway_payment_ref.to_string(),
        signature: state
            .payments
            .expected_signature(gateway_order_ref, gateway_payment_ref),
    }
}

pub fn staff(state: &ServerState, staff_id: &str) -> DeliveryStaff {
    state
        .storage
        .get_restaurant(RESTAURANT)
        .unwrap()
        .unwrap()
        .staff(staff_id)
        .cloned()
        .unwrap()
}

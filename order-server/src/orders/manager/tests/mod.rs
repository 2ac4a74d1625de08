use super::*;
use crate::staff::AllocationError;
use rust_decimal::Decimal;
use shared::models::{DeliveryStaff, Restaurant};
use shared::order::{InvalidTransition, OrderItem};

mod test_advance;

const RESTAURANT: &str = "r-1";

fn create_test_manager() -> (Storage, OrdersManager) {
    let storage = Storage::open_in_memory().unwrap();
    let mut restaurant = Restaurant::new(RESTAURANT, "Spice Hub", 20, 0);
    restaurant
        .delivery_staff
        .push(DeliveryStaff::new("s-1", "Ravi", "P1", 0));
    restaurant
        .delivery_staff
        .push(DeliveryStaff::new("s-2", "Meena", "P2", 0));
    storage.insert_restaurant(&restaurant).unwrap();
    storage
        .insert_restaurant(&Restaurant::new("r-2", "Other Kitchen", 10, 0))
        .unwrap();

    let manager = OrdersManager::new(storage.clone(), StaffAllocator::new(storage.clone()));
    (storage, manager)
}

fn test_order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        customer_id: "c-1".to_string(),
        restaurant_id: RESTAURANT.to_string(),
        items: vec![
            OrderItem {
                menu_item_id: "m-1".to_string(),
                quantity: 2,
                unit_price: Decimal::from(150),
            },
            OrderItem {
                menu_item_id: "m-2".to_string(),
                quantity: 1,
                unit_price: Decimal::from(200),
            },
        ],
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
        created_at: now_millis(),
        updated_at: now_millis(),
    }
}

fn to(status: OrderStatus) -> StatusUpdate {
    StatusUpdate {
        status,
        ..Default::default()
    }
}

fn staff(storage: &Storage, staff_id: &str) -> DeliveryStaff {
    storage
        .get_restaurant(RESTAURANT)
        .unwrap()
        .unwrap()
        .staff(staff_id)
        .cloned()
        .unwrap()
}

/// Drive an order to out_for_delivery with `staff_id`
fn dispatch(manager: &OrdersManager, order_id: &str, staff_id: &str) -> Order {
    manager
        .advance(order_id, RESTAURANT, to(OrderStatus::Preparing))
        .unwrap();
    manager
        .advance(
            order_id,
            RESTAURANT,
            StatusUpdate {
                status: OrderStatus::OutForDelivery,
                reason: None,
                delivery_staff_id: Some(staff_id.to_string()),
            },
        )
        .unwrap()
        .order
}

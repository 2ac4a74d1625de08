//! Order record and checkout payloads

use super::status::{OrderStatus, PaymentStatus};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Line item with the unit price captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Persisted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub restaurant_id: String,
    pub items: Vec<OrderItem>,
    /// Fixed at checkout; never recomputed from items
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Set only while out for delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_staff_id: Option<String>,
    pub delivery_address: String,
    pub phone_number: String,
    /// Gateway order reference
    pub payment_intent_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_payment_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// `assigned_staff_id` is present exactly while out for delivery
    pub fn staff_assignment_consistent(&self) -> bool {
        self.assigned_staff_id.is_some() == (self.status == OrderStatus::OutForDelivery)
    }

    pub fn is_stale_pending(&self, now_millis: i64, ttl_millis: i64) -> bool {
        self.status == OrderStatus::Pending && now_millis - self.created_at > ttl_millis
    }
}

/// Checkout line as submitted by the customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub menu_item_id: String,
    pub restaurant_id: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Checkout request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub amount: Decimal,
    pub items: Vec<OrderLineInput>,
    pub delivery_address: String,
    pub phone_number: String,
}

impl OrderDraft {
    /// Restaurant is taken from the first line item
    pub fn restaurant_id(&self) -> Option<&str> {
        self.items
            .first()
            .map(|item| item.restaurant_id.as_str())
            .filter(|id| !id.trim().is_empty())
    }
}

/// Checkout response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub order_id: String,
    pub gateway_order_ref: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    /// Public gateway key the client checkout widget needs
    pub key_id: String,
}

/// Gateway completion callback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub gateway_order_ref: String,
    pub gateway_payment_ref: String,
    pub signature: String,
}

/// Customer-reported payment failure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailure {
    pub gateway_order_ref: String,
}

/// Result of a confirmation; `order_id` is `None` if the order is gone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationOutcome {
    pub order_id: Option<String>,
}

/// Restaurant status change request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub delivery_staff_id: Option<String>,
}

/// Convert a major-unit amount to minor units (e.g. rupees to paise), half away from zero
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

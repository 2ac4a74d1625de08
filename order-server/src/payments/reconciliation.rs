//! Payment reconciliation
//!
//! ```text
//! initiate(draft)
//!     ├─ 1. Validate draft, derive restaurant from first line
//!     ├─ 2. Gateway order (under timeout)   ── failure: nothing persisted
//!     └─ 3. Persist pending order with the gateway reference
//!
//! confirm(callback)
//!     ├─ 1. Verify HMAC                     ── mismatch: security log, reject
//!     ├─ 2. Resolve gateway ref -> order    ── missing (reaped): audit warn, ok
//!     └─ 3. pending -> paid
//! ```

use super::error::{PaymentError, PaymentResult};
use super::gateway::{GatewayOrderRequest, PaymentGateway};
use super::signature;
use crate::orders::{ManagerError, OrdersManager};
use crate::storage::Storage;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_ITEM_QUANTITY, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use rust_decimal::Decimal;
use shared::order::{
    ConfirmationOutcome, Order, OrderDraft, OrderItem, OrderStatus, PaymentConfirmation,
    PaymentIntent, PaymentStatus, to_minor_units,
};
use shared::util::{new_id, now_millis};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Gateway credentials and limits
#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub key_id: String,
    pub webhook_secret: String,
    pub currency: String,
    pub gateway_timeout: Duration,
}

#[derive(Clone)]
pub struct PaymentService {
    storage: Storage,
    manager: OrdersManager,
    gateway: Arc<dyn PaymentGateway>,
    settings: PaymentSettings,
}

impl PaymentService {
    pub fn new(
        storage: Storage,
        manager: OrdersManager,
        gateway: Arc<dyn PaymentGateway>,
        settings: PaymentSettings,
    ) -> Self {
        Self {
            storage,
            manager,
            gateway,
            settings,
        }
    }

    /// Create the gateway order, then the local pending order
    pub async fn initiate(&self, customer_id: &str, draft: OrderDraft) -> PaymentResult<PaymentIntent> {
        let restaurant_id = self.validate_draft(&draft)?;
        let amount_minor = to_minor_units(draft.amount)
            .filter(|a| *a > 0)
            .ok_or_else(|| PaymentError::InvalidOrderRequest("amount is out of range".to_string()))?;

        let request = GatewayOrderRequest {
            amount: amount_minor,
            currency: self.settings.currency.clone(),
            receipt: format!("order_{}", now_millis()),
            notes: HashMap::from([
                ("userId".to_string(), customer_id.to_string()),
                ("restaurantId".to_string(), restaurant_id.clone()),
                ("deliveryAddress".to_string(), draft.delivery_address.clone()),
                ("phoneNumber".to_string(), draft.phone_number.clone()),
            ]),
        };

        let gateway_order = tokio::time::timeout(
            self.settings.gateway_timeout,
            self.gateway.create_order(&request),
        )
        .await
        .map_err(|_| {
            PaymentError::GatewayUnavailable(format!(
                "no response within {}ms",
                self.settings.gateway_timeout.as_millis()
            ))
        })??;

        let now = now_millis();
        let order = Order {
            id: new_id(),
            customer_id: customer_id.to_string(),
            restaurant_id,
            items: draft
                .items
                .iter()
                .map(|line| OrderItem {
                    menu_item_id: line.menu_item_id.trim().to_string(),
                    quantity: line.quantity,
                    unit_price: line.price,
                })
                .collect(),
            total_amount: draft.amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            assigned_staff_id: None,
            delivery_address: draft.delivery_address.trim().to_string(),
            phone_number: draft.phone_number.trim().to_string(),
            payment_intent_ref: gateway_order.id.clone(),
            gateway_payment_ref: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.manager.create(&order)?;

        tracing::info!(
            order_id = %order.id,
            gateway_order_ref = %gateway_order.id,
            amount_minor = gateway_order.amount,
            "Payment initiated"
        );

        Ok(PaymentIntent {
            order_id: order.id,
            gateway_order_ref: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
            key_id: self.settings.key_id.clone(),
        })
    }

    /// Returns the restaurant id taken from the first line
    fn validate_draft(&self, draft: &OrderDraft) -> PaymentResult<String> {
        let invalid = PaymentError::InvalidOrderRequest;

        if draft.amount <= Decimal::ZERO {
            return Err(invalid("Valid amount is required".to_string()));
        }
        if draft.items.is_empty() {
            return Err(invalid("Valid items array is required".to_string()));
        }
        validate_required_text(&draft.delivery_address, "deliveryAddress", MAX_ADDRESS_LEN)
            .map_err(invalid)?;
        validate_required_text(&draft.phone_number, "phoneNumber", MAX_SHORT_TEXT_LEN)
            .map_err(invalid)?;

        let restaurant_id = draft
            .restaurant_id()
            .ok_or_else(|| invalid("Restaurant ID is required".to_string()))?
            .to_string();

        for line in &draft.items {
            if line.restaurant_id != restaurant_id {
                return Err(invalid("All items must come from one restaurant".to_string()));
            }
            if line.menu_item_id.trim().is_empty() {
                return Err(invalid("menuItemId is required".to_string()));
            }
            if line.quantity == 0 || line.quantity > MAX_ITEM_QUANTITY {
                return Err(invalid(format!(
                    "quantity must be between 1 and {MAX_ITEM_QUANTITY}"
                )));
            }
            if line.price < Decimal::ZERO {
                return Err(invalid("price must not be negative".to_string()));
            }
        }

        let restaurant = self
            .storage
            .get_restaurant(&restaurant_id)?
            .ok_or_else(|| invalid(format!("Unknown restaurant: {restaurant_id}")))?;
        if !restaurant.delivery_available {
            return Err(invalid("Restaurant is not accepting delivery orders".to_string()));
        }

        Ok(restaurant_id)
    }

    /// Verify a gateway completion callback and mark the order paid
    pub fn confirm(&self, confirmation: &PaymentConfirmation) -> PaymentResult<ConfirmationOutcome> {
        let gateway_order_ref = confirmation.gateway_order_ref.as_str();
        let gateway_payment_ref = confirmation.gateway_payment_ref.as_str();

        if !signature::verify(
            &self.settings.webhook_secret,
            gateway_order_ref,
            gateway_payment_ref,
            &confirmation.signature,
        ) {
            crate::security_log!(
                WARN,
                "invalid_payment_signature",
                gateway_order_ref = %gateway_order_ref,
                gateway_payment_ref = %gateway_payment_ref
            );
            return Err(PaymentError::InvalidSignature);
        }

        let Some(order_id) = self.storage.find_order_by_gateway_ref(gateway_order_ref)? else {
            return Ok(self.orphan_confirmation(gateway_order_ref, gateway_payment_ref));
        };

        match self.manager.mark_paid(&order_id, gateway_payment_ref) {
            Ok(order) => Ok(ConfirmationOutcome {
                order_id: Some(order.id),
            }),
            // Reaped between lookup and write
            Err(ManagerError::OrderNotFound(_)) => {
                Ok(self.orphan_confirmation(gateway_order_ref, gateway_payment_ref))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn orphan_confirmation(
        &self,
        gateway_order_ref: &str,
        gateway_payment_ref: &str,
    ) -> ConfirmationOutcome {
        tracing::warn!(
            target: "audit",
            action = "payment_without_order",
            gateway_order_ref,
            gateway_payment_ref,
            "Verified payment has no matching order"
        );
        ConfirmationOutcome { order_id: None }
    }

    /// Customer-reported failure: `pending -> failed`
    pub fn fail(&self, customer_id: &str, gateway_order_ref: &str) -> PaymentResult<Order> {
        let order_id = self
            .storage
            .find_order_by_gateway_ref(gateway_order_ref)?
            .ok_or_else(|| PaymentError::PaymentNotFound(gateway_order_ref.to_string()))?;

        // Ownership check; foreign orders read as not found
        self.manager
            .get_for_customer(&order_id, customer_id)
            .map_err(|e| match e {
                ManagerError::OrderNotFound(_) => {
                    PaymentError::PaymentNotFound(gateway_order_ref.to_string())
                }
                other => other.into(),
            })?;

        Ok(self.manager.mark_payment_failed(&order_id)?)
    }

    /// Signature the gateway would send for this pair
    pub fn expected_signature(&self, gateway_order_ref: &str, gateway_payment_ref: &str) -> String {
        signature::sign(&self.settings.webhook_secret, gateway_order_ref, gateway_payment_ref)
    }
}

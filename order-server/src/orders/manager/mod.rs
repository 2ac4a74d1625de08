//! OrdersManager - order status transitions and queries
//!
//! This module handles:
//! - Restaurant-driven status transitions with their staff side effects
//! - Payment-driven transitions (`pending -> paid`, `pending -> failed`)
//! - Order creation and ownership-scoped lookups
//!
//! # Transition Flow
//!
//! ```text
//! advance(order_id, restaurant_id, update)
//!     ├─ 1. Load order, check ownership (mismatch reads as not found)
//!     ├─ 2. Plan edge from the transition table
//!     ├─ 3. Apply effects in table order
//!     │      ├─ RequireCancellationReason
//!     │      ├─ ClaimStaff              (atomic claim before any write)
//!     │      ├─ ReleaseStaffIfAssigned  (deferred to step 4)
//!     │      └─ OfferAvailableStaff
//!     ├─ 4. Conditional write: status must still equal the planned `from`
//!     │      ├─ on mismatch: give back any staff claimed in step 3
//!     │      └─ terminal target: take the stored assignment, release it
//!     │         after commit (failure logged, not fatal)
//!     └─ 5. Return order (+ available staff when entering preparing)
//! ```

mod error;
pub use error::*;

use crate::staff::StaffAllocator;
use crate::storage::Storage;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use serde::{Deserialize, Serialize};
use shared::models::StaffRef;
use shared::order::transition;
use shared::order::{
    Order, OrderStatus, PaymentStatus, StatusUpdate, TransitionEffect, TransitionOrigin,
};
use shared::util::now_millis;

/// Result of a restaurant-driven transition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceOutcome {
    pub order: Order,
    /// Free staff snapshot, present only when entering `preparing`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_staff: Option<Vec<StaffRef>>,
}

/// Order field changes decided before the conditional write
#[derive(Default)]
struct PlannedChanges {
    reason: Option<String>,
    claimed: Option<StaffRef>,
    release_assigned: bool,
    offer_staff: bool,
}

#[derive(Clone)]
pub struct OrdersManager {
    storage: Storage,
    allocator: StaffAllocator,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("storage", &"<Storage>")
            .finish()
    }
}

impl OrdersManager {
    pub fn new(storage: Storage, allocator: StaffAllocator) -> Self {
        Self { storage, allocator }
    }

    /// Persist a freshly checked-out order
    pub fn create(&self, order: &Order) -> ManagerResult<()> {
        self.storage.insert_order(order)?;
        tracing::info!(
            order_id = %order.id,
            restaurant_id = %order.restaurant_id,
            total = %order.total_amount,
            "Order created"
        );
        Ok(())
    }

    // ========== Restaurant transitions ==========

    /// Move an order to `update.status` on behalf of its restaurant
    pub fn advance(
        &self,
        order_id: &str,
        restaurant_id: &str,
        update: StatusUpdate,
    ) -> ManagerResult<AdvanceOutcome> {
        let current = self.get_for_restaurant(order_id, restaurant_id)?;
        self.advance_from(&current, update)
    }

    /// Transition planned against `current`, which may be stale by the time
    /// the conditional write runs
    fn advance_from(&self, current: &Order, update: StatusUpdate) -> ManagerResult<AdvanceOutcome> {
        let order_id = current.id.as_str();
        let restaurant_id = current.restaurant_id.as_str();
        let from = current.status;
        let to = update.status;

        let effects = transition::plan(from, to, TransitionOrigin::Restaurant).inspect_err(|e| {
            crate::audit_log!(
                format!("restaurant:{restaurant_id}"),
                "order_transition_rejected",
                format!("order:{order_id}"),
                e.to_string()
            );
        })?;

        let changes = self.apply_effects(current, effects, &update)?;
        let new_assignment = changes.claimed.as_ref().map(|s| s.id.clone());

        // The staff to release is read from the stored order, never the snapshot
        let written = self.storage.update_order(order_id, |order| {
            if order.status != from {
                return Err(ManagerError::ConcurrentModification(order_id.to_string()));
            }
            order.status = to;
            let released = if changes.release_assigned {
                order.assigned_staff_id.take()
            } else {
                None
            };
            if new_assignment.is_some() {
                order.assigned_staff_id = new_assignment.clone();
            }
            if let Some(reason) = &changes.reason {
                order.cancellation_reason = Some(reason.clone());
            }
            order.updated_at = now_millis();
            Ok((order.clone(), released))
        });

        let (order, released) = match written {
            Ok(written) => written,
            Err(e) => {
                if let Some(staff) = &changes.claimed {
                    self.give_back(restaurant_id, &staff.id);
                }
                if matches!(e, ManagerError::ConcurrentModification(_)) {
                    tracing::warn!(order_id, %from, %to, "Order changed during transition");
                }
                return Err(e);
            }
        };

        if let Some(staff_id) = released
            && let Err(e) = self.allocator.release(restaurant_id, &staff_id)
        {
            tracing::error!(
                order_id,
                staff_id = %staff_id,
                error = %e,
                "Staff release failed, transition kept"
            );
        }

        crate::audit_log!(
            format!("restaurant:{restaurant_id}"),
            "order_status",
            format!("order:{order_id}"),
            format!("{from} -> {to}")
        );

        let available_staff = if changes.offer_staff {
            Some(self.allocator.list_available(restaurant_id)?)
        } else {
            None
        };

        Ok(AdvanceOutcome {
            order,
            available_staff,
        })
    }

    fn apply_effects(
        &self,
        current: &Order,
        effects: &[TransitionEffect],
        update: &StatusUpdate,
    ) -> ManagerResult<PlannedChanges> {
        let mut changes = PlannedChanges::default();

        for effect in effects {
            match effect {
                TransitionEffect::RequireCancellationReason => {
                    let reason = update
                        .reason
                        .as_deref()
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .ok_or(ManagerError::MissingCancellationReason)?;
                    validate_required_text(reason, "reason", MAX_NOTE_LEN)
                        .map_err(ManagerError::Validation)?;
                    changes.reason = Some(reason.to_string());
                }
                TransitionEffect::ClaimStaff => {
                    let staff_id = update
                        .delivery_staff_id
                        .as_deref()
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .ok_or(ManagerError::MissingStaffAssignment)?;
                    changes.claimed = Some(self.allocator.claim(&current.restaurant_id, staff_id)?);
                }
                TransitionEffect::ReleaseStaffIfAssigned => changes.release_assigned = true,
                TransitionEffect::OfferAvailableStaff => changes.offer_staff = true,
            }
        }

        Ok(changes)
    }

    /// Undo a claim whose order write did not land
    fn give_back(&self, restaurant_id: &str, staff_id: &str) {
        if let Err(e) = self.allocator.release(restaurant_id, staff_id) {
            tracing::error!(restaurant_id, staff_id, error = %e, "Failed to return claimed staff");
        }
    }

    // ========== Payment transitions ==========

    /// `pending -> paid` on a verified gateway confirmation
    ///
    /// A repeat with the same payment reference returns the order unchanged.
    pub fn mark_paid(&self, order_id: &str, gateway_payment_ref: &str) -> ManagerResult<Order> {
        let (order, changed) = self.storage.update_order(order_id, |order| {
            if order.payment_status == PaymentStatus::Completed {
                return if order.gateway_payment_ref.as_deref() == Some(gateway_payment_ref) {
                    Ok((order.clone(), false))
                } else {
                    Err(ManagerError::PaymentAlreadyCompleted(order_id.to_string()))
                };
            }
            transition::plan(order.status, OrderStatus::Paid, TransitionOrigin::Payment)?;
            order.status = OrderStatus::Paid;
            order.payment_status = PaymentStatus::Completed;
            order.gateway_payment_ref = Some(gateway_payment_ref.to_string());
            order.updated_at = now_millis();
            Ok((order.clone(), true))
        })?;

        if changed {
            crate::audit_log!(
                "payment_gateway",
                "order_paid",
                format!("order:{order_id}"),
                gateway_payment_ref.to_string()
            );
        } else {
            tracing::debug!(order_id, "Duplicate payment confirmation ignored");
        }
        Ok(order)
    }

    /// `pending -> failed` on a reported payment failure
    pub fn mark_payment_failed(&self, order_id: &str) -> ManagerResult<Order> {
        let (order, changed) = self.storage.update_order(order_id, |order| {
            if order.status == OrderStatus::Failed {
                return Ok((order.clone(), false));
            }
            transition::plan(order.status, OrderStatus::Failed, TransitionOrigin::Payment)?;
            order.status = OrderStatus::Failed;
            order.payment_status = PaymentStatus::Failed;
            order.updated_at = now_millis();
            Ok::<_, ManagerError>((order.clone(), true))
        })?;

        if changed {
            crate::audit_log!("payment_gateway", "order_payment_failed", format!("order:{order_id}"));
        }
        Ok(order)
    }

    // ========== Queries ==========

    /// Order owned by `restaurant_id`; foreign orders read as not found
    pub fn get_for_restaurant(&self, order_id: &str, restaurant_id: &str) -> ManagerResult<Order> {
        self.storage
            .get_order(order_id)?
            .filter(|o| o.restaurant_id == restaurant_id)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    /// Order placed by `customer_id`; foreign orders read as not found
    pub fn get_for_customer(&self, order_id: &str, customer_id: &str) -> ManagerResult<Order> {
        self.storage
            .get_order(order_id)?
            .filter(|o| o.customer_id == customer_id)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    /// Restaurant's orders, newest first, optionally narrowed to one status
    pub fn list_for_restaurant(
        &self,
        restaurant_id: &str,
        status: Option<OrderStatus>,
    ) -> ManagerResult<Vec<Order>> {
        Ok(self.storage.find_orders(|o| {
            o.restaurant_id == restaurant_id && status.is_none_or(|s| o.status == s)
        })?)
    }

    /// Customer's orders, newest first
    pub fn list_for_customer(&self, customer_id: &str) -> ManagerResult<Vec<Order>> {
        Ok(self.storage.find_orders(|o| o.customer_id == customer_id)?)
    }
}

#[cfg(test)]
mod tests;

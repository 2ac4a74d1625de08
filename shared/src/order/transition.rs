//! Order transition table
//!
//! The table says which `to` states are reachable from each `from` state and
//! who may drive the edge. Each target state carries a declarative list of
//! effects that the caller applies in order; terminal targets always carry
//! [`TransitionEffect::ReleaseStaffIfAssigned`].

use super::status::OrderStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who is requesting the transition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOrigin {
    /// Restaurant owner through the status endpoint
    Restaurant,
    /// Payment reconciliation (gateway callback or failure report)
    Payment,
}

/// Side effect attached to entering a status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEffect {
    /// Reject unless a non-empty reason is supplied
    RequireCancellationReason,
    /// Claim the supplied delivery staff before persisting
    ClaimStaff,
    /// Release the assigned staff (if any) and clear the assignment
    ReleaseStaffIfAssigned,
    /// Return the restaurant's free staff alongside the updated order
    OfferAvailableStaff,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot move order from {from} to {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// States reachable from `from`, regardless of origin
pub fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Paid, Failed],
        Paid => &[Preparing, Cancelled],
        Preparing => &[OutForDelivery, Delivered, Cancelled],
        OutForDelivery => &[Delivered, Cancelled],
        Delivered | Cancelled | Failed => &[],
    }
}

/// Whether `origin` may drive `from -> to`
pub fn is_allowed(from: OrderStatus, to: OrderStatus, origin: TransitionOrigin) -> bool {
    if !allowed_targets(from).contains(&to) {
        return false;
    }
    match (from, to) {
        (OrderStatus::Pending, OrderStatus::Paid) => origin == TransitionOrigin::Payment,
        (OrderStatus::Pending, OrderStatus::Failed) => true,
        _ => origin == TransitionOrigin::Restaurant,
    }
}

/// Effects of entering `to`, in application order
///
/// Input checks come first so a rejected request never touches staff.
pub fn effects(to: OrderStatus) -> &'static [TransitionEffect] {
    use TransitionEffect::*;
    match to {
        OrderStatus::Preparing => &[OfferAvailableStaff],
        OrderStatus::OutForDelivery => &[ClaimStaff],
        OrderStatus::Delivered => &[ReleaseStaffIfAssigned],
        OrderStatus::Cancelled => &[RequireCancellationReason, ReleaseStaffIfAssigned],
        OrderStatus::Failed => &[ReleaseStaffIfAssigned],
        OrderStatus::Pending | OrderStatus::Paid => &[],
    }
}

/// Validate an edge and return the effects to apply
pub fn plan(
    from: OrderStatus,
    to: OrderStatus,
    origin: TransitionOrigin,
) -> Result<&'static [TransitionEffect], InvalidTransition> {
    if is_allowed(from, to, origin) {
        Ok(effects(to))
    } else {
        Err(InvalidTransition { from, to })
    }
}

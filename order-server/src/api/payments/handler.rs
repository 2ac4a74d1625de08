//! Payment API handlers

use axum::{Json, extract::State};
use shared::order::{ConfirmationOutcome, Order, PaymentConfirmation, PaymentFailure};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

/// Signed gateway callback relayed by the customer's checkout
pub async fn verify(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(confirmation): Json<PaymentConfirmation>,
) -> AppResult<Json<ApiResponse<ConfirmationOutcome>>> {
    user.require_customer()?;
    let outcome = state.payments.confirm(&confirmation)?;
    Ok(Json(ApiResponse::success(outcome)))
}

pub async fn failed(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(failure): Json<PaymentFailure>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let customer_id = user.require_customer()?;
    let order = state.payments.fail(customer_id, &failure.gateway_order_ref)?;
    Ok(Json(ApiResponse::success(order)))
}

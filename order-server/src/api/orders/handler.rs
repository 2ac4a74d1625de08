//! Order API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::order::{Order, OrderDraft, OrderStatus, PaymentIntent, StatusUpdate};

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::orders::AdvanceOutcome;
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// Checkout: gateway order plus local pending order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(draft): Json<OrderDraft>,
) -> AppResult<Json<ApiResponse<PaymentIntent>>> {
    let customer_id = user.require_customer()?;
    let intent = state.payments.initiate(customer_id, draft).await?;
    Ok(Json(ApiResponse::success(intent)))
}

/// Restaurant's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let restaurant_id = user.require_restaurant()?;
    let orders = state.orders.list_for_restaurant(restaurant_id, query.status)?;
    Ok(Json(ApiResponse::success(orders)))
}

/// Customer's orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let customer_id = user.require_customer()?;
    let orders = state.orders.list_for_customer(customer_id)?;
    Ok(Json(ApiResponse::success(orders)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = match user.role {
        Role::Restaurant => state.orders.get_for_restaurant(&id, &user.id)?,
        Role::Customer => state.orders.get_for_customer(&id, &user.id)?,
        Role::Admin => {
            return Err(AppError::permission_denied(
                "Orders are visible to their restaurant and customer",
            ));
        }
    };
    Ok(Json(ApiResponse::success(order)))
}

/// Restaurant status transition
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<AdvanceOutcome>>> {
    let restaurant_id = user.require_restaurant()?;
    let outcome = state.orders.advance(&id, restaurant_id, update)?;
    Ok(Json(ApiResponse::success(outcome)))
}

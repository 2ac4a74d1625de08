//! Reservation API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Reservation, ReservationCreate, ReservationStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let restaurant_id = user.require_restaurant()?;
    let reservations = state.reservations.list(restaurant_id)?;
    Ok(Json(ApiResponse::success(reservations)))
}

/// A full restaurant is a 409 (`InsufficientCapacity`)
pub async fn book(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let restaurant_id = user.require_restaurant()?;
    let reservation = state.reservations.book(restaurant_id, payload)?;
    Ok(Json(ApiResponse::success(reservation)))
}

pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let restaurant_id = user.require_restaurant()?;
    let reservation = state
        .reservations
        .update_status(restaurant_id, &id, payload.status)?;
    Ok(Json(ApiResponse::success(reservation)))
}

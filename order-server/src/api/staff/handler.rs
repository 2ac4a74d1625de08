//! Delivery staff API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{AvailabilityUpdate, DeliveryStaff, StaffCreate, StaffRef, StaffUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct StaffCount {
    pub count: usize,
}

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<DeliveryStaff>>>> {
    let restaurant_id = user.require_restaurant()?;
    let staff = state.roster.list_staff(restaurant_id)?;
    Ok(Json(ApiResponse::success(staff)))
}

pub async fn count(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<StaffCount>>> {
    let restaurant_id = user.require_restaurant()?;
    let count = state.roster.staff_count(restaurant_id)?;
    Ok(Json(ApiResponse::success(StaffCount { count })))
}

/// Staff that could take a delivery right now
pub async fn list_available(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<StaffRef>>>> {
    let restaurant_id = user.require_restaurant()?;
    let staff = state.allocator.list_available(restaurant_id)?;
    Ok(Json(ApiResponse::success(staff)))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<ApiResponse<DeliveryStaff>>> {
    let restaurant_id = user.require_restaurant()?;
    let staff = state.roster.add_staff(restaurant_id, payload)?;
    Ok(Json(ApiResponse::success(staff)))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<ApiResponse<DeliveryStaff>>> {
    let restaurant_id = user.require_restaurant()?;
    let staff = state.roster.edit_staff(restaurant_id, &id, payload)?;
    Ok(Json(ApiResponse::success(staff)))
}

pub async fn set_availability(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<AvailabilityUpdate>,
) -> AppResult<Json<ApiResponse<DeliveryStaff>>> {
    let restaurant_id = user.require_restaurant()?;
    let staff = state
        .roster
        .set_availability(restaurant_id, &id, payload.availability)?;
    Ok(Json(ApiResponse::success(staff)))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let restaurant_id = user.require_restaurant()?;
    state.roster.remove_staff(restaurant_id, &id)?;
    Ok(Json(ApiResponse::ok()))
}

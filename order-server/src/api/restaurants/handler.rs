//! Restaurant API handlers

use axum::{Json, extract::State};
use shared::models::{Restaurant, RestaurantSettingsUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub async fn get_me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let restaurant_id = user.require_restaurant()?;
    let restaurant = state.restaurants.get(restaurant_id)?;
    Ok(Json(ApiResponse::success(restaurant)))
}

pub async fn update_settings(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RestaurantSettingsUpdate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let restaurant_id = user.require_restaurant()?;
    let restaurant = state.restaurants.update_settings(restaurant_id, payload)?;
    Ok(Json(ApiResponse::success(restaurant)))
}

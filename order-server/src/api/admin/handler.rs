//! Admin API handlers

use axum::{Json, extract::State};
use shared::models::{Restaurant, RestaurantCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub async fn provision_restaurant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    user.require_admin()?;
    let restaurant = state.restaurants.provision(payload)?;
    Ok(Json(ApiResponse::success(restaurant)))
}

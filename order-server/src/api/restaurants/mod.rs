//! Restaurant API (restaurant role)
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/restaurants/me | GET | own aggregate |
//! | /api/restaurants/me/settings | PUT | capacity and service flags |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/me", get(handler::get_me))
        .route("/me/settings", put(handler::update_settings))
}

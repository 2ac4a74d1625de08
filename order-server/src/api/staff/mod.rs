//! Delivery staff API (restaurant role)
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/staff | GET / POST | list / add |
//! | /api/staff/count | GET | roster size |
//! | /api/staff/available | GET | staff free for dispatch |
//! | /api/staff/{id} | PUT / DELETE | edit / remove |
//! | /api/staff/{id}/availability | PUT | manual availability toggle |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/staff", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/count", get(handler::count))
        .route("/available", get(handler::list_available))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/availability", put(handler::set_availability))
}

//! Reservation API (restaurant role)
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/reservations | GET | list |
//! | /api/reservations | POST | book |
//! | /api/reservations/{id} | PUT | status change |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::book))
        .route("/{id}", put(handler::update_status))
}

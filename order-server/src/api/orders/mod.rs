//! Order API
//!
//! | Path | Method | Role |
//! |------|--------|------|
//! | /api/orders | POST | customer (checkout) |
//! | /api/orders | GET | restaurant |
//! | /api/orders/mine | GET | customer |
//! | /api/orders/{id} | GET | restaurant or owning customer |
//! | /api/orders/{id}/status | PUT | restaurant |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/mine", get(handler::list_mine))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}

//! Payment API
//!
//! | Path | Method | Role |
//! |------|--------|------|
//! | /api/payments/verify | POST | customer |
//! | /api/payments/failed | POST | customer |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/verify", post(handler::verify))
        .route("/failed", post(handler::failed))
}

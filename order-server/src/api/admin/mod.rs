//! Admin API
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/admin/restaurants | POST | provision a restaurant aggregate |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/restaurants", post(handler::provision_restaurant))
}

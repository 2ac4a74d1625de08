//! HTTP API
//!
//! - [`health`] - liveness
//! - [`orders`] - checkout, order queries and status transitions
//! - [`payments`] - payment confirmation and failure
//! - [`staff`] - delivery staff roster and availability
//! - [`reservations`] - dine-in bookings
//! - [`restaurants`] - restaurant settings
//! - [`admin`] - restaurant provisioning
//!
//! Every route except `/health` resolves the caller from a bearer token.

pub mod admin;
pub mod health;
pub mod orders;
pub mod payments;
pub mod reservations;
pub mod restaurants;
pub mod staff;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn routes() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(staff::router())
        .merge(reservations::router())
        .merge(restaurants::router())
        .merge(admin::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_router(state: ServerState) -> Router {
    routes()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}

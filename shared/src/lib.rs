//! Shared types for the ordering platform
//!
//! Domain model (orders, restaurants, staff, reservations), the unified
//! error system, and small utilities used by the server and its clients.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

//! Core: configuration, shared state, background tasks and the HTTP server
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - services shared by handlers
//! - [`BackgroundTasks`] - task registry
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::{Config, PaymentConfig};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
pub use tasks::BackgroundTasks;

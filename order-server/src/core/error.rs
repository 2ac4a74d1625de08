use thiserror::Error;

use crate::payments::GatewayError;
use crate::storage::StorageError;

/// Startup and lifecycle failures of the server process
///
/// Request-level failures never reach this type; they are [`crate::AppError`]s.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Payment gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

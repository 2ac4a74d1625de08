use super::gateway::GatewayError;
use crate::orders::ManagerError;
use crate::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Payment reconciliation errors
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid order request: {0}")]
    InvalidOrderRequest(String),

    #[error("Invalid payment signature")]
    InvalidSignature,

    /// Timeout or transport failure talking to the gateway
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// Gateway answered but refused or returned garbage
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("No order for gateway reference: {0}")]
    PaymentNotFound(String),

    #[error(transparent)]
    Order(#[from] ManagerError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<GatewayError> for PaymentError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(e) if e.is_timeout() || e.is_connect() => {
                Self::GatewayUnavailable(e.to_string())
            }
            other => Self::Gateway(other.to_string()),
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::InvalidOrderRequest(msg) => {
                AppError::with_message(ErrorCode::InvalidOrderRequest, msg)
            }
            PaymentError::InvalidSignature => AppError::new(ErrorCode::InvalidSignature),
            PaymentError::GatewayUnavailable(msg) => {
                tracing::error!(error = %msg, "Payment gateway unavailable");
                AppError::new(ErrorCode::GatewayUnavailable)
            }
            PaymentError::Gateway(msg) => {
                tracing::error!(error = %msg, "Payment gateway error");
                AppError::new(ErrorCode::GatewayError)
            }
            PaymentError::PaymentNotFound(gateway_ref) => {
                AppError::new(ErrorCode::PaymentNotFound).with_detail("gateway_order_ref", gateway_ref)
            }
            PaymentError::Order(e) => e.into(),
            PaymentError::Storage(e) => AppError::database(e.to_string()),
        }
    }
}

pub type PaymentResult<T> = Result<T, PaymentError>;

use crate::staff::AllocationError;
use crate::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use shared::order::InvalidTransition;
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(StorageError),

    /// Unknown id, or an order owned by someone else
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("Order was modified concurrently: {0}")]
    ConcurrentModification(String),

    #[error("Delivery staff is required")]
    MissingStaffAssignment,

    #[error("Reason is required")]
    MissingCancellationReason,

    #[error("Payment already completed with another reference: {0}")]
    PaymentAlreadyCompleted(String),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("{0}")]
    Validation(String),
}

impl From<StorageError> for ManagerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::OrderNotFound(id) => Self::OrderNotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => {
                tracing::error!(error = %e, "Order storage error");
                AppError::database(e.to_string())
            }
            ManagerError::OrderNotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id)
            }
            ManagerError::InvalidTransition(e) => {
                AppError::with_message(ErrorCode::InvalidTransition, e.to_string())
                    .with_detail("from", e.from.as_str())
                    .with_detail("to", e.to.as_str())
            }
            ManagerError::ConcurrentModification(id) => {
                AppError::new(ErrorCode::ConcurrentModification).with_detail("order_id", id)
            }
            ManagerError::MissingStaffAssignment => AppError::new(ErrorCode::MissingStaffAssignment),
            ManagerError::MissingCancellationReason => {
                AppError::new(ErrorCode::MissingCancellationReason)
            }
            ManagerError::PaymentAlreadyCompleted(id) => {
                AppError::new(ErrorCode::PaymentAlreadyCompleted).with_detail("order_id", id)
            }
            ManagerError::Allocation(e) => e.into(),
            ManagerError::Validation(msg) => AppError::validation(msg),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

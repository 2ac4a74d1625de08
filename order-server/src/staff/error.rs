use crate::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Staff allocation errors
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Staff not found: {0}")]
    StaffNotFound(String),

    #[error("Staff unavailable: {0}")]
    StaffUnavailable(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AllocationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::RestaurantNotFound(id) => Self::RestaurantNotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Staff management errors
#[derive(Debug, Error)]
pub enum StaffError {
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Staff not found: {0}")]
    StaffNotFound(String),

    #[error("Staff exist with same id proof: {0}")]
    DuplicateIdProof(String),

    #[error("Staff is assigned to a delivery: {0}")]
    StaffBusy(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for StaffError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::RestaurantNotFound(id) => Self::RestaurantNotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::RestaurantNotFound(id) => {
                AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurant_id", id)
            }
            AllocationError::StaffNotFound(id) => {
                AppError::new(ErrorCode::StaffNotFound).with_detail("staff_id", id)
            }
            AllocationError::StaffUnavailable(id) => {
                AppError::new(ErrorCode::StaffUnavailable).with_detail("staff_id", id)
            }
            AllocationError::Storage(e) => AppError::database(e.to_string()),
        }
    }
}

impl From<StaffError> for AppError {
    fn from(err: StaffError) -> Self {
        match err {
            StaffError::RestaurantNotFound(id) => {
                AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurant_id", id)
            }
            StaffError::StaffNotFound(id) => {
                AppError::new(ErrorCode::StaffNotFound).with_detail("staff_id", id)
            }
            StaffError::DuplicateIdProof(proof) => {
                AppError::new(ErrorCode::DuplicateIdProof).with_detail("id_proof_number", proof)
            }
            StaffError::StaffBusy(id) => {
                AppError::new(ErrorCode::StaffBusy).with_detail("staff_id", id)
            }
            StaffError::Validation(msg) => AppError::validation(msg),
            StaffError::Storage(e) => AppError::database(e.to_string()),
        }
    }
}

use crate::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use shared::models::ReservationStatus;
use thiserror::Error;

/// Reservation capacity errors
#[derive(Debug, Error)]
pub enum CapacityError {
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Restaurant is full: requested {requested}, remaining {remaining}")]
    InsufficientCapacity { requested: u32, remaining: u32 },

    #[error("Cannot move reservation from {from} to {to}")]
    InvalidStatus {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for CapacityError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::RestaurantNotFound(id) => Self::RestaurantNotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<CapacityError> for AppError {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::RestaurantNotFound(id) => {
                AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurant_id", id)
            }
            CapacityError::ReservationNotFound(id) => {
                AppError::new(ErrorCode::ReservationNotFound).with_detail("reservation_id", id)
            }
            CapacityError::InsufficientCapacity {
                requested,
                remaining,
            } => AppError::new(ErrorCode::InsufficientCapacity)
                .with_detail("requested", requested)
                .with_detail("remaining", remaining),
            CapacityError::InvalidStatus { from, to } => {
                AppError::new(ErrorCode::InvalidReservationStatus)
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
            CapacityError::Validation(msg) => AppError::validation(msg),
            CapacityError::Storage(e) => AppError::database(e.to_string()),
        }
    }
}

pub type CapacityResult<T> = Result<T, CapacityError>;

//! HTTP status code mapping for error codes
//!
//! Groups follow the failure taxonomy: validation and signature failures
//! are 400, unknown or foreign ids are 404, state conflicts are 409 and
//! payment gateway failures are 502.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::PaymentNotFound
            | Self::RestaurantNotFound
            | Self::ReservationNotFound
            | Self::StaffNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::InvalidTransition
            | Self::ConcurrentModification
            | Self::PaymentAlreadyCompleted
            | Self::InsufficientCapacity
            | Self::InvalidCapacity
            | Self::InvalidReservationStatus
            | Self::StaffUnavailable
            | Self::DuplicateIdProof
            | Self::StaffBusy => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired | Self::AdminRequired => {
                StatusCode::FORBIDDEN
            }

            // 502 Bad Gateway
            Self::GatewayUnavailable | Self::GatewayError => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::MissingStaffAssignment
            | Self::MissingCancellationReason
            | Self::InvalidOrderRequest
            | Self::OrderEmpty
            | Self::InvalidSignature => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::RestaurantNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::StaffNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::InvalidTransition.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::ConcurrentModification.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::StaffUnavailable.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InsufficientCapacity.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::InvalidSignature.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::MissingStaffAssignment.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidOrderRequest.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_status() {
        assert_eq!(
            ErrorCode::GatewayUnavailable.http_status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ErrorCode::GatewayError.http_status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_auth_status() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

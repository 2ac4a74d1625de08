//! Unified error codes for the ordering platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 7xxx: Reservation errors
//! - 8xxx: Delivery staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can match on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found (or not owned by the caller)
    OrderNotFound = 4001,
    /// Requested status is not reachable from the current one
    InvalidTransition = 4002,
    /// Order changed between read and write
    ConcurrentModification = 4003,
    /// out_for_delivery requires a delivery staff id
    MissingStaffAssignment = 4004,
    /// cancelled requires a non-empty reason
    MissingCancellationReason = 4005,
    /// Order request is missing or has invalid fields
    InvalidOrderRequest = 4006,
    /// Order has no items
    OrderEmpty = 4007,

    // ==================== 5xxx: Payment ====================
    /// Callback signature does not match
    InvalidSignature = 5001,
    /// Payment gateway timed out or is unreachable
    GatewayUnavailable = 5002,
    /// Payment gateway rejected the request
    GatewayError = 5003,
    /// Unknown gateway order reference
    PaymentNotFound = 5004,
    /// Payment already completed with another reference
    PaymentAlreadyCompleted = 5005,

    // ==================== 7xxx: Reservation ====================
    /// Restaurant not found
    RestaurantNotFound = 7001,
    /// Reservation not found
    ReservationNotFound = 7002,
    /// Party does not fit in remaining dine-in capacity
    InsufficientCapacity = 7003,
    /// Capacity change would drop below booked seats
    InvalidCapacity = 7004,
    /// Reservation status change is not allowed
    InvalidReservationStatus = 7005,

    // ==================== 8xxx: Delivery staff ====================
    /// Staff not found in the restaurant's pool
    StaffNotFound = 8001,
    /// Staff is unavailable or already delivering
    StaffUnavailable = 8002,
    /// Another staff member uses the same id proof number
    DuplicateIdProof = 8003,
    /// Staff is bound to an in-flight delivery
    StaffBusy = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default human readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Role is required",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidTransition => "Invalid status transition",
            ErrorCode::ConcurrentModification => "Order was modified concurrently",
            ErrorCode::MissingStaffAssignment => "Delivery staff is required",
            ErrorCode::MissingCancellationReason => "Reason is required",
            ErrorCode::InvalidOrderRequest => "Invalid order request",
            ErrorCode::OrderEmpty => "Order is empty",

            // Payment
            ErrorCode::InvalidSignature => "Invalid payment signature",
            ErrorCode::GatewayUnavailable => "Payment gateway unavailable",
            ErrorCode::GatewayError => "Payment gateway error",
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentAlreadyCompleted => "Payment has already been completed",

            // Reservation
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InsufficientCapacity => "Restaurant is full",
            ErrorCode::InvalidCapacity => "Capacity is below booked seats",
            ErrorCode::InvalidReservationStatus => "Invalid reservation status",

            // Staff
            ErrorCode::StaffNotFound => "Staff not found",
            ErrorCode::StaffUnavailable => "Staff is not available",
            ErrorCode::DuplicateIdProof => "Staff exist with same id proof",
            ErrorCode::StaffBusy => "Staff is assigned to a delivery",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidTransition),
            4003 => Ok(ErrorCode::ConcurrentModification),
            4004 => Ok(ErrorCode::MissingStaffAssignment),
            4005 => Ok(ErrorCode::MissingCancellationReason),
            4006 => Ok(ErrorCode::InvalidOrderRequest),
            4007 => Ok(ErrorCode::OrderEmpty),

            // Payment
            5001 => Ok(ErrorCode::InvalidSignature),
            5002 => Ok(ErrorCode::GatewayUnavailable),
            5003 => Ok(ErrorCode::GatewayError),
            5004 => Ok(ErrorCode::PaymentNotFound),
            5005 => Ok(ErrorCode::PaymentAlreadyCompleted),

            // Reservation
            7001 => Ok(ErrorCode::RestaurantNotFound),
            7002 => Ok(ErrorCode::ReservationNotFound),
            7003 => Ok(ErrorCode::InsufficientCapacity),
            7004 => Ok(ErrorCode::InvalidCapacity),
            7005 => Ok(ErrorCode::InvalidReservationStatus),

            // Staff
            8001 => Ok(ErrorCode::StaffNotFound),
            8002 => Ok(ErrorCode::StaffUnavailable),
            8003 => Ok(ErrorCode::DuplicateIdProof),
            8004 => Ok(ErrorCode::StaffBusy),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

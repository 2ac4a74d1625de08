//! Utilities
//!
//! - [`logger`] - tracing setup plus the `audit_log!` / `security_log!` macros
//! - [`validation`] - text checks shared by the services
//! - error types re-exported from `shared::error`

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

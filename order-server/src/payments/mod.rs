//! Payment reconciliation
//!
//! - [`PaymentService`] - checkout (`initiate`), callback (`confirm`), failure report (`fail`)
//! - [`gateway`] - remote gateway client and the in-process development gateway
//! - [`signature`] - HMAC-SHA256 callback signatures

pub mod error;
pub mod gateway;
pub mod reconciliation;
pub mod signature;

pub use error::{PaymentError, PaymentResult};
pub use gateway::{GatewayError, LocalGateway, PaymentGateway, RazorpayGateway};
pub use reconciliation::{PaymentService, PaymentSettings};

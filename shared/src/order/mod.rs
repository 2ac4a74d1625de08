//! Order domain types
//!
//! - [`OrderStatus`] / [`PaymentStatus`]: the two status axes of an order
//! - [`transition`]: which status edges exist and what entering a state implies
//! - [`Order`]: the persisted record plus checkout and callback payloads

pub mod status;
pub mod transition;
pub mod types;

pub use status::{OrderStatus, PaymentStatus};
pub use transition::{InvalidTransition, TransitionEffect, TransitionOrigin};
pub use types::*;

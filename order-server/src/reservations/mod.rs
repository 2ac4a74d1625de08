//! Dine-in reservations against restaurant seating capacity

pub mod error;
pub mod tracker;

pub use error::{CapacityError, CapacityResult};
pub use tracker::ReservationTracker;

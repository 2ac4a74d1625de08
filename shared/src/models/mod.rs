//! Data models
//!
//! Shared between the order server and its API clients. Restaurant-owned
//! entities (menu, staff, reservations) live inside the [`Restaurant`]
//! aggregate; ids are opaque strings.

pub mod menu;
pub mod reservation;
pub mod restaurant;
pub mod staff;

// Re-exports
pub use menu::*;
pub use reservation::*;
pub use restaurant::*;
pub use staff::*;

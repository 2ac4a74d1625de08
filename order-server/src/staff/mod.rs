//! Delivery staff
//!
//! - [`StaffAllocator`] - claim / release / list available (delivery lifecycle)
//! - [`StaffRoster`] - restaurant-side staff management

pub mod allocator;
pub mod error;
pub mod roster;

pub use allocator::{AllocationResult, StaffAllocator};
pub use error::{AllocationError, StaffError};
pub use roster::{StaffResult, StaffRoster};

//! Order lifecycle
//!
//! - **manager**: status transitions with their staff side effects, and queries
//! - **reaper**: periodic removal of abandoned pending checkouts
//!
//! # Architecture
//!
//! ```text
//! Restaurant ──advance──┐
//!                       ├──> OrdersManager ──> Storage (redb)
//! Payments ──mark_paid──┘          │
//!                                  └──> StaffAllocator (claim / release)
//!
//! PendingOrderReaper ──(hourly)──> Storage::remove_pending_before
//! ```

pub mod manager;
pub mod reaper;

// Re-exports
pub use manager::{AdvanceOutcome, ManagerError, ManagerResult, OrdersManager};
pub use reaper::PendingOrderReaper;

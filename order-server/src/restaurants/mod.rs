//! Restaurant aggregate: settings and admin provisioning

pub mod service;

pub use service::{RestaurantError, RestaurantResult, RestaurantService};

//! Reservation Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status; only `Booked` holds seats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReservationStatus {
    #[default]
    Booked,
    Cancelled,
    Completed,
    #[serde(rename = "No Show")]
    NoShow,
}

impl ReservationStatus {
    pub fn holds_capacity(&self) -> bool {
        matches!(self, ReservationStatus::Booked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "Booked",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::NoShow => "No Show",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dine-in reservation, embedded in a restaurant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub guest_name: String,
    pub reservation_time: DateTime<Utc>,
    pub no_of_persons: u32,
    pub status: ReservationStatus,
    pub created_at: i64,
}

/// Booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub guest_name: String,
    pub reservation_time: DateTime<Utc>,
    pub no_of_persons: u32,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
}

/// Whether a party fits in the remaining seats
pub fn fits_capacity(party_size: u32, remaining: u32) -> bool {
    party_size <= remaining
}

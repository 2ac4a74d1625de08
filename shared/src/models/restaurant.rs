//! Restaurant aggregate
//!
//! The restaurant is the aggregate root for its menu, delivery staff pool and
//! reservation list. Sub-entities are addressed by id inside the aggregate.

use super::menu::MenuItem;
use super::reservation::Reservation;
use super::staff::{DeliveryStaff, StaffRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub delivery_staff: Vec<DeliveryStaff>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    /// Configured seats
    pub total_dine_in_capacity: u32,
    /// Seats not held by booked reservations
    pub dine_in_capacity: u32,
    pub delivery_available: bool,
    pub take_away_available: bool,
    pub dine_in_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Restaurant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: u32, now: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            menu_items: Vec::new(),
            delivery_staff: Vec::new(),
            reservations: Vec::new(),
            total_dine_in_capacity: capacity,
            dine_in_capacity: capacity,
            delivery_available: true,
            take_away_available: true,
            dine_in_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn staff(&self, staff_id: &str) -> Option<&DeliveryStaff> {
        self.delivery_staff.iter().find(|s| s.id == staff_id)
    }

    pub fn staff_mut(&mut self, staff_id: &str) -> Option<&mut DeliveryStaff> {
        self.delivery_staff.iter_mut().find(|s| s.id == staff_id)
    }

    /// Staff that can be claimed right now
    pub fn available_staff(&self) -> Vec<StaffRef> {
        self.delivery_staff
            .iter()
            .filter(|s| s.is_free())
            .map(DeliveryStaff::to_ref)
            .collect()
    }

    /// Whether another staff member already uses `id_proof_number`
    pub fn id_proof_taken(&self, id_proof_number: &str, except_staff_id: Option<&str>) -> bool {
        self.delivery_staff.iter().any(|s| {
            s.id_proof_number == id_proof_number && Some(s.id.as_str()) != except_staff_id
        })
    }

    pub fn reservation(&self, reservation_id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == reservation_id)
    }

    pub fn reservation_mut(&mut self, reservation_id: &str) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| r.id == reservation_id)
    }

    /// Seats held by reservations in `Booked`
    pub fn booked_seats(&self) -> u32 {
        self.reservations
            .iter()
            .filter(|r| r.status.holds_capacity())
            .map(|r| r.no_of_persons)
            .sum()
    }

    /// Remaining capacity equals total minus booked seats
    pub fn capacity_consistent(&self) -> bool {
        self.total_dine_in_capacity
            .checked_sub(self.booked_seats())
            .is_some_and(|free| free == self.dine_in_capacity)
    }
}

/// Admin provisioning payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: String,
    pub total_dine_in_capacity: u32,
    #[serde(default)]
    pub menu_items: Vec<super::menu::MenuItemCreate>,
}

/// Settings update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettingsUpdate {
    pub total_dine_in_capacity: Option<u32>,
    pub delivery_available: Option<bool>,
    pub take_away_available: Option<bool>,
    pub dine_in_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ReservationStatus;
    use chrono::Utc;

    fn reservation(id: &str, persons: u32, status: ReservationStatus) -> Reservation {
        Reservation {
            id: id.into(),
            guest_name: "Guest".into(),
            reservation_time: Utc::now(),
            no_of_persons: persons,
            status,
            created_at: 0,
        }
    }

    #[test]
    fn test_available_staff_excludes_busy_and_unavailable() {
        let mut r = Restaurant::new("r-1", "Spice Hub", 20, 0);
        r.delivery_staff.push(DeliveryStaff::new("s-1", "A", "P1", 0));
        r.delivery_staff.push(DeliveryStaff::new("s-2", "B", "P2", 0));
        r.delivery_staff.push(DeliveryStaff::new("s-3", "C", "P3", 0));
        r.staff_mut("s-2").unwrap().mark_claimed();
        r.staff_mut("s-3").unwrap().availability = false;

        let ids: Vec<_> = r.available_staff().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["s-1".to_string()]);
    }

    #[test]
    fn test_id_proof_taken() {
        let mut r = Restaurant::new("r-1", "Spice Hub", 20, 0);
        r.delivery_staff.push(DeliveryStaff::new("s-1", "A", "P1", 0));
        assert!(r.id_proof_taken("P1", None));
        assert!(!r.id_proof_taken("P1", Some("s-1")));
        assert!(!r.id_proof_taken("P2", None));
    }

    #[test]
    fn test_capacity_consistency() {
        let mut r = Restaurant::new("r-1", "Spice Hub", 10, 0);
        r.reservations.push(reservation("a", 4, ReservationStatus::Booked));
        r.reservations.push(reservation("b", 3, ReservationStatus::Cancelled));
        r.dine_in_capacity = 6;
        assert_eq!(r.booked_seats(), 4);
        assert!(r.capacity_consistent());

        r.dine_in_capacity = 7;
        assert!(!r.capacity_consistent());
    }
}

//! Reservation capacity tracker
//!
//! Remaining seats (`dine_in_capacity`) always equal the configured total minus
//! the party sizes of `Booked` reservations. Booking is a conditional decrement
//! inside the restaurant's write transaction; leaving `Booked` credits the seats
//! back exactly once.

use super::error::{CapacityError, CapacityResult};
use crate::storage::Storage;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PARTY_SIZE, validate_required_text};
use shared::models::{Reservation, ReservationCreate, ReservationStatus, fits_capacity};
use shared::util::{new_id, now_millis};

#[derive(Clone)]
pub struct ReservationTracker {
    storage: Storage,
}

impl ReservationTracker {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn book(&self, restaurant_id: &str, payload: ReservationCreate) -> CapacityResult<Reservation> {
        validate_required_text(&payload.guest_name, "guestName", MAX_NAME_LEN)
            .map_err(CapacityError::Validation)?;
        if payload.no_of_persons == 0 || payload.no_of_persons > MAX_PARTY_SIZE {
            return Err(CapacityError::Validation(format!(
                "noOfPersons must be between 1 and {MAX_PARTY_SIZE}"
            )));
        }

        let party = payload.no_of_persons;
        let reservation = self.storage.update_restaurant(restaurant_id, |restaurant| {
            if !fits_capacity(party, restaurant.dine_in_capacity) {
                return Err(CapacityError::InsufficientCapacity {
                    requested: party,
                    remaining: restaurant.dine_in_capacity,
                });
            }
            restaurant.dine_in_capacity -= party;

            let reservation = Reservation {
                id: new_id(),
                guest_name: payload.guest_name.trim().to_string(),
                reservation_time: payload.reservation_time,
                no_of_persons: party,
                status: ReservationStatus::Booked,
                created_at: now_millis(),
            };
            restaurant.reservations.push(reservation.clone());
            Ok(reservation)
        })?;

        tracing::info!(
            restaurant_id,
            reservation_id = %reservation.id,
            party,
            "Reservation booked"
        );
        Ok(reservation)
    }

    /// Change a reservation's status
    ///
    /// Leaving `Booked` returns the party's seats; repeating the same status is
    /// a no-op. A released reservation cannot re-enter `Booked`.
    pub fn update_status(
        &self,
        restaurant_id: &str,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> CapacityResult<Reservation> {
        let (reservation, credited) = self.storage.update_restaurant(restaurant_id, |restaurant| {
            let current = restaurant
                .reservation(reservation_id)
                .ok_or_else(|| CapacityError::ReservationNotFound(reservation_id.to_string()))?;
            let from = current.status;
            let party = current.no_of_persons;

            if from == status {
                return Ok((current.clone(), 0));
            }
            if !from.holds_capacity() && status.holds_capacity() {
                return Err(CapacityError::InvalidStatus { from, to: status });
            }

            let credited = if from.holds_capacity() { party } else { 0 };
            restaurant.dine_in_capacity = restaurant
                .dine_in_capacity
                .saturating_add(credited)
                .min(restaurant.total_dine_in_capacity);

            let reservation = restaurant
                .reservation_mut(reservation_id)
                .ok_or_else(|| CapacityError::ReservationNotFound(reservation_id.to_string()))?;
            reservation.status = status;
            Ok((reservation.clone(), credited))
        })?;

        tracing::info!(
            restaurant_id,
            reservation_id,
            status = %status,
            seats_returned = credited,
            "Reservation status updated"
        );
        Ok(reservation)
    }

    /// Reservations in booking order
    pub fn list(&self, restaurant_id: &str) -> CapacityResult<Vec<Reservation>> {
        let restaurant = self
            .storage
            .get_restaurant(restaurant_id)?
            .ok_or_else(|| CapacityError::RestaurantNotFound(restaurant_id.to_string()))?;
        Ok(restaurant.reservations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::Restaurant;

    fn setup(capacity: u32) -> (Storage, ReservationTracker) {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .insert_restaurant(&Restaurant::new("r-1", "Spice Hub", capacity, 0))
            .unwrap();
        (storage.clone(), ReservationTracker::new(storage))
    }

    fn party(size: u32) -> ReservationCreate {
        ReservationCreate {
            guest_name: "Anita".to_string(),
            reservation_time: Utc.with_ymd_and_hms(2026, 5, 1, 19, 30, 0).unwrap(),
            no_of_persons: size,
        }
    }

    fn remaining(storage: &Storage) -> u32 {
        storage.get_restaurant("r-1").unwrap().unwrap().dine_in_capacity
    }

    #[test]
    fn test_booking_exactly_fills_capacity() {
        let (storage, tracker) = setup(10);
        let reservation = tracker.book("r-1", party(10)).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Booked);
        assert_eq!(remaining(&storage), 0);

        assert!(matches!(
            tracker.book("r-1", party(1)),
            Err(CapacityError::InsufficientCapacity {
                requested: 1,
                remaining: 0
            })
        ));
        assert_eq!(tracker.list("r-1").unwrap().len(), 1);
    }

    #[test]
    fn test_cancel_restores_capacity_once() {
        let (storage, tracker) = setup(10);
        let reservation = tracker.book("r-1", party(4)).unwrap();
        assert_eq!(remaining(&storage), 6);

        tracker
            .update_status("r-1", &reservation.id, ReservationStatus::Cancelled)
            .unwrap();
        assert_eq!(remaining(&storage), 10);

        tracker
            .update_status("r-1", &reservation.id, ReservationStatus::Cancelled)
            .unwrap();
        assert_eq!(remaining(&storage), 10);

        // Moving between non-booked states does not credit again
        tracker
            .update_status("r-1", &reservation.id, ReservationStatus::NoShow)
            .unwrap();
        assert_eq!(remaining(&storage), 10);
        assert!(storage.get_restaurant("r-1").unwrap().unwrap().capacity_consistent());
    }

    #[test]
    fn test_released_reservation_cannot_rebook() {
        let (_storage, tracker) = setup(10);
        let reservation = tracker.book("r-1", party(2)).unwrap();
        tracker
            .update_status("r-1", &reservation.id, ReservationStatus::Completed)
            .unwrap();

        assert!(matches!(
            tracker.update_status("r-1", &reservation.id, ReservationStatus::Booked),
            Err(CapacityError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_rejected_inputs() {
        let (_storage, tracker) = setup(10);
        assert!(matches!(
            tracker.book("r-1", party(0)),
            Err(CapacityError::Validation(_))
        ));
        let mut nameless = party(2);
        nameless.guest_name = " ".to_string();
        assert!(matches!(
            tracker.book("r-1", nameless),
            Err(CapacityError::Validation(_))
        ));
        assert!(matches!(
            tracker.book("r-x", party(2)),
            Err(CapacityError::RestaurantNotFound(_))
        ));
        assert!(matches!(
            tracker.update_status("r-1", "ghost", ReservationStatus::Cancelled),
            Err(CapacityError::ReservationNotFound(_))
        ));
    }

    #[test]
    fn test_concurrent_bookings_never_overbook() {
        use std::thread;

        let (storage, tracker) = setup(10);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = tracker.clone();
                thread::spawn(move || tracker.book("r-1", party(3)).is_ok())
            })
            .collect();
        let booked = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(booked, 3);
        assert_eq!(remaining(&storage), 1);
        assert!(storage.get_restaurant("r-1").unwrap().unwrap().capacity_consistent());
    }
}

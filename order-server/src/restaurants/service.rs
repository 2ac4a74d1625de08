//! Restaurant settings and provisioning
//!
//! Changing the configured seat total recomputes the remaining seats from the
//! booked reservations, so the capacity invariant survives the edit.

use crate::storage::{Storage, StorageError};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, Restaurant, RestaurantCreate, RestaurantSettingsUpdate};
use shared::util::{new_id, now_millis};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestaurantError {
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    #[error("Capacity {total} is below {booked} booked seats")]
    InvalidCapacity { total: u32, booked: u32 },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for RestaurantError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::RestaurantNotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<RestaurantError> for AppError {
    fn from(err: RestaurantError) -> Self {
        match err {
            RestaurantError::NotFound(id) => {
                AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurant_id", id)
            }
            RestaurantError::InvalidCapacity { total, booked } => {
                AppError::new(ErrorCode::InvalidCapacity)
                    .with_detail("total", total)
                    .with_detail("booked", booked)
            }
            RestaurantError::Validation(msg) => AppError::validation(msg),
            RestaurantError::Storage(e) => AppError::database(e.to_string()),
        }
    }
}

pub type RestaurantResult<T> = Result<T, RestaurantError>;

#[derive(Clone)]
pub struct RestaurantService {
    storage: Storage,
}

impl RestaurantService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn get(&self, restaurant_id: &str) -> RestaurantResult<Restaurant> {
        self.storage
            .get_restaurant(restaurant_id)?
            .ok_or_else(|| RestaurantError::NotFound(restaurant_id.to_string()))
    }

    pub fn update_settings(
        &self,
        restaurant_id: &str,
        update: RestaurantSettingsUpdate,
    ) -> RestaurantResult<Restaurant> {
        let restaurant = self.storage.update_restaurant(restaurant_id, |restaurant| {
            if let Some(total) = update.total_dine_in_capacity {
                let booked = restaurant.booked_seats();
                let remaining = total
                    .checked_sub(booked)
                    .ok_or(RestaurantError::InvalidCapacity { total, booked })?;
                restaurant.total_dine_in_capacity = total;
                restaurant.dine_in_capacity = remaining;
            }
            if let Some(flag) = update.delivery_available {
                restaurant.delivery_available = flag;
            }
            if let Some(flag) = update.take_away_available {
                restaurant.take_away_available = flag;
            }
            if let Some(flag) = update.dine_in_available {
                restaurant.dine_in_available = flag;
            }
            Ok::<_, RestaurantError>(restaurant.clone())
        })?;

        tracing::info!(
            restaurant_id,
            total_dine_in_capacity = restaurant.total_dine_in_capacity,
            dine_in_capacity = restaurant.dine_in_capacity,
            "Restaurant settings updated"
        );
        Ok(restaurant)
    }

    /// Create an empty aggregate for a verified restaurant
    pub fn provision(&self, payload: RestaurantCreate) -> RestaurantResult<Restaurant> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)
            .map_err(RestaurantError::Validation)?;

        let mut menu_items = Vec::with_capacity(payload.menu_items.len());
        for item in payload.menu_items {
            validate_required_text(&item.name, "menu item name", MAX_NAME_LEN)
                .map_err(RestaurantError::Validation)?;
            if item.price < Decimal::ZERO {
                return Err(RestaurantError::Validation(format!(
                    "price of '{}' must not be negative",
                    item.name
                )));
            }
            menu_items.push(MenuItem {
                id: new_id(),
                name: item.name.trim().to_string(),
                description: item.description,
                price: item.price,
                category: item.category,
                item_type: item.item_type,
                stock: item.stock,
            });
        }

        let mut restaurant = Restaurant::new(
            new_id(),
            payload.name.trim(),
            payload.total_dine_in_capacity,
            now_millis(),
        );
        restaurant.menu_items = menu_items;
        self.storage.insert_restaurant(&restaurant)?;

        crate::audit_log!(
            "admin",
            "restaurant_provisioned",
            format!("restaurant:{}", restaurant.id),
            restaurant.name.clone()
        );
        Ok(restaurant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::ReservationTracker;
    use chrono::Utc;
    use shared::models::{MenuItemCreate, ReservationCreate};

    fn setup() -> (RestaurantService, ReservationTracker, String) {
        let storage = Storage::open_in_memory().unwrap();
        let service = RestaurantService::new(storage.clone());
        let restaurant = service
            .provision(RestaurantCreate {
                name: "Spice Hub".into(),
                total_dine_in_capacity: 10,
                menu_items: vec![MenuItemCreate {
                    name: "Paneer Tikka".into(),
                    description: String::new(),
                    price: Decimal::from(250),
                    category: "Starters".into(),
                    item_type: "veg".into(),
                    stock: 20,
                }],
            })
            .unwrap();
        (service, ReservationTracker::new(storage), restaurant.id)
    }

    fn book(tracker: &ReservationTracker, id: &str, persons: u32) {
        tracker
            .book(
                id,
                ReservationCreate {
                    guest_name: "Guest".into(),
                    reservation_time: Utc::now(),
                    no_of_persons: persons,
                },
            )
            .unwrap();
    }

    #[test]
    fn test_provision_creates_full_capacity() {
        let (service, _tracker, id) = setup();
        let restaurant = service.get(&id).unwrap();
        assert_eq!(restaurant.dine_in_capacity, 10);
        assert_eq!(restaurant.menu_items.len(), 1);
        assert!(!restaurant.menu_items[0].id.is_empty());
        assert!(restaurant.delivery_available);
    }

    #[test]
    fn test_capacity_change_keeps_booked_seats() {
        let (service, tracker, id) = setup();
        book(&tracker, &id, 4);

        let updated = service
            .update_settings(
                &id,
                RestaurantSettingsUpdate {
                    total_dine_in_capacity: Some(6),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.total_dine_in_capacity, 6);
        assert_eq!(updated.dine_in_capacity, 2);
        assert!(updated.capacity_consistent());

        assert!(matches!(
            service.update_settings(
                &id,
                RestaurantSettingsUpdate {
                    total_dine_in_capacity: Some(3),
                    ..Default::default()
                },
            ),
            Err(RestaurantError::InvalidCapacity {
                total: 3,
                booked: 4
            })
        ));
        assert_eq!(service.get(&id).unwrap().total_dine_in_capacity, 6);
    }

    #[test]
    fn test_flags_update() {
        let (service, _tracker, id) = setup();
        let updated = service
            .update_settings(
                &id,
                RestaurantSettingsUpdate {
                    delivery_available: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.delivery_available);
        assert!(updated.take_away_available);
    }

    #[test]
    fn test_unknown_restaurant() {
        let (service, _tracker, _id) = setup();
        assert!(matches!(service.get("ghost"), Err(RestaurantError::NotFound(_))));
        assert!(matches!(
            service.update_settings("ghost", RestaurantSettingsUpdate::default()),
            Err(RestaurantError::NotFound(_))
        ));
    }
}

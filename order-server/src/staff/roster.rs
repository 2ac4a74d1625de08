//! Restaurant-side staff management
//!
//! Add, edit, toggle and remove delivery staff. Members bound to a delivery
//! cannot be toggled or removed; only the allocator changes their flags.

use super::error::StaffError;
use crate::storage::Storage;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use shared::models::{DeliveryStaff, StaffCreate, StaffUpdate};
use shared::util::{new_id, now_millis};

pub type StaffResult<T> = Result<T, StaffError>;

#[derive(Clone)]
pub struct StaffRoster {
    storage: Storage,
}

impl StaffRoster {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn add_staff(&self, restaurant_id: &str, payload: StaffCreate) -> StaffResult<DeliveryStaff> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN).map_err(StaffError::Validation)?;
        validate_required_text(&payload.id_proof_number, "idProofNumber", MAX_SHORT_TEXT_LEN)
            .map_err(StaffError::Validation)?;

        let id_proof = payload.id_proof_number.trim().to_string();
        let staff = self.storage.update_restaurant(restaurant_id, |restaurant| {
            if restaurant.id_proof_taken(&id_proof, None) {
                return Err(StaffError::DuplicateIdProof(id_proof.clone()));
            }
            let staff = DeliveryStaff::new(new_id(), payload.name.trim(), id_proof.clone(), now_millis());
            restaurant.delivery_staff.push(staff.clone());
            Ok(staff)
        })?;

        tracing::info!(restaurant_id, staff_id = %staff.id, "Delivery staff added");
        Ok(staff)
    }

    pub fn list_staff(&self, restaurant_id: &str) -> StaffResult<Vec<DeliveryStaff>> {
        let restaurant = self
            .storage
            .get_restaurant(restaurant_id)?
            .ok_or_else(|| StaffError::RestaurantNotFound(restaurant_id.to_string()))?;
        Ok(restaurant.delivery_staff)
    }

    pub fn staff_count(&self, restaurant_id: &str) -> StaffResult<usize> {
        Ok(self.list_staff(restaurant_id)?.len())
    }

    /// Edit name / id proof; assignment flags are not touched
    pub fn edit_staff(
        &self,
        restaurant_id: &str,
        staff_id: &str,
        payload: StaffUpdate,
    ) -> StaffResult<DeliveryStaff> {
        validate_optional_text(&payload.name, "name", MAX_NAME_LEN).map_err(StaffError::Validation)?;
        validate_optional_text(&payload.id_proof_number, "idProofNumber", MAX_SHORT_TEXT_LEN)
            .map_err(StaffError::Validation)?;
        if let Some(name) = &payload.name
            && name.trim().is_empty()
        {
            return Err(StaffError::Validation("name must not be empty".to_string()));
        }
        if let Some(proof) = &payload.id_proof_number
            && proof.trim().is_empty()
        {
            return Err(StaffError::Validation(
                "idProofNumber must not be empty".to_string(),
            ));
        }

        self.storage.update_restaurant(restaurant_id, |restaurant| {
            if let Some(proof) = &payload.id_proof_number
                && restaurant.id_proof_taken(proof.trim(), Some(staff_id))
            {
                return Err(StaffError::DuplicateIdProof(proof.trim().to_string()));
            }
            let staff = restaurant
                .staff_mut(staff_id)
                .ok_or_else(|| StaffError::StaffNotFound(staff_id.to_string()))?;
            if let Some(name) = payload.name {
                staff.name = name.trim().to_string();
            }
            if let Some(proof) = payload.id_proof_number {
                staff.id_proof_number = proof.trim().to_string();
            }
            Ok(staff.clone())
        })
    }

    /// Manual availability toggle, refused while on a delivery
    pub fn set_availability(
        &self,
        restaurant_id: &str,
        staff_id: &str,
        availability: bool,
    ) -> StaffResult<DeliveryStaff> {
        let staff = self.storage.update_restaurant(restaurant_id, |restaurant| {
            let staff = restaurant
                .staff_mut(staff_id)
                .ok_or_else(|| StaffError::StaffNotFound(staff_id.to_string()))?;
            if staff.delivery_assigned {
                return Err(StaffError::StaffBusy(staff_id.to_string()));
            }
            staff.availability = availability;
            Ok(staff.clone())
        })?;

        tracing::info!(restaurant_id, staff_id, availability, "Staff availability updated");
        Ok(staff)
    }

    pub fn remove_staff(&self, restaurant_id: &str, staff_id: &str) -> StaffResult<()> {
        self.storage.update_restaurant(restaurant_id, |restaurant| {
            let staff = restaurant
                .staff(staff_id)
                .ok_or_else(|| StaffError::StaffNotFound(staff_id.to_string()))?;
            if staff.delivery_assigned {
                return Err(StaffError::StaffBusy(staff_id.to_string()));
            }
            restaurant.delivery_staff.retain(|s| s.id != staff_id);
            Ok(())
        })?;

        tracing::info!(restaurant_id, staff_id, "Delivery staff removed");
        Ok(())
    }
}

//! Delivery staff allocation
//!
//! `claim` and `release` are the only writers of a staff member's
//! `availability` / `delivery_assigned` pair once the member is on a
//! delivery. Both run as a conditional update of the owning restaurant
//! aggregate, so two claims on the same staff member serialize and exactly
//! one of them observes the member as free.

use super::error::AllocationError;
use crate::storage::Storage;
use shared::models::StaffRef;

pub type AllocationResult<T> = Result<T, AllocationError>;

#[derive(Clone)]
pub struct StaffAllocator {
    storage: Storage,
}

impl StaffAllocator {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Bind a free staff member to a delivery
    pub fn claim(&self, restaurant_id: &str, staff_id: &str) -> AllocationResult<StaffRef> {
        let claimed = self.storage.update_restaurant(restaurant_id, |restaurant| {
            let staff = restaurant
                .staff_mut(staff_id)
                .ok_or_else(|| AllocationError::StaffNotFound(staff_id.to_string()))?;
            if !staff.is_free() {
                return Err(AllocationError::StaffUnavailable(staff_id.to_string()));
            }
            staff.mark_claimed();
            Ok(staff.to_ref())
        })?;

        tracing::info!(restaurant_id, staff_id, "Delivery staff claimed");
        Ok(claimed)
    }

    /// Return a staff member to the pool
    ///
    /// Releasing a member that is already free succeeds without change.
    pub fn release(&self, restaurant_id: &str, staff_id: &str) -> AllocationResult<()> {
        let was_assigned = self.storage.update_restaurant(restaurant_id, |restaurant| {
            let staff = restaurant
                .staff_mut(staff_id)
                .ok_or_else(|| AllocationError::StaffNotFound(staff_id.to_string()))?;
            let was_assigned = staff.delivery_assigned;
            staff.mark_released();
            Ok::<_, AllocationError>(was_assigned)
        })?;

        if was_assigned {
            tracing::info!(restaurant_id, staff_id, "Delivery staff released");
        } else {
            tracing::debug!(restaurant_id, staff_id, "Release on free staff, no-op");
        }
        Ok(())
    }

    /// Staff that could be claimed right now (informational snapshot)
    pub fn list_available(&self, restaurant_id: &str) -> AllocationResult<Vec<StaffRef>> {
        let restaurant = self
            .storage
            .get_restaurant(restaurant_id)?
            .ok_or_else(|| AllocationError::RestaurantNotFound(restaurant_id.to_string()))?;
        Ok(restaurant.available_staff())
    }
}

//! Delivery Staff Model

use serde::{Deserialize, Serialize};

/// Delivery staff member, owned by a restaurant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStaff {
    pub id: String,
    pub name: String,
    /// Unique within one restaurant
    pub id_proof_number: String,
    /// Eligible for new assignments
    pub availability: bool,
    /// Bound to an in-flight order
    pub delivery_assigned: bool,
    pub created_at: i64,
}

impl DeliveryStaff {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        id_proof_number: impl Into<String>,
        now: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            id_proof_number: id_proof_number.into(),
            availability: true,
            delivery_assigned: false,
            created_at: now,
        }
    }

    /// Can be claimed for a delivery
    pub fn is_free(&self) -> bool {
        self.availability && !self.delivery_assigned
    }

    /// An assigned staff member is never marked available
    pub fn flags_consistent(&self) -> bool {
        !(self.delivery_assigned && self.availability)
    }

    pub fn mark_claimed(&mut self) {
        self.availability = false;
        self.delivery_assigned = true;
    }

    pub fn mark_released(&mut self) {
        self.availability = true;
        self.delivery_assigned = false;
    }

    pub fn to_ref(&self) -> StaffRef {
        StaffRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Lightweight handle returned by allocation queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StaffRef {
    pub id: String,
    pub name: String,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCreate {
    pub name: String,
    pub id_proof_number: String,
}

/// Update staff payload (assignment flags are not editable)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub id_proof_number: Option<String>,
}

/// Manual availability toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub availability: bool,
}

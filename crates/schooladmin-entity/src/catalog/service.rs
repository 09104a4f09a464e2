//! Service catalog models and the create/update payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use schooladmin_core::types::{SchoolId, ServiceId, SlotId};

use crate::serde_helpers::{lenient_f64, lenient_u32, null_as_empty};
use crate::slot::TimeBucket;

/// Session length the backend expects for every service, in minutes.
pub const DEFAULT_SERVICE_DURATION: u32 = 180;

/// Per-bucket price row attached to a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSlot {
    /// Row id.
    pub id: SlotId,
    /// Bucket label.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slot_name: String,
    /// Price for the bucket.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    /// Whether the bucket can be booked.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl ServiceSlot {
    /// Update entry carrying this row's current values.
    pub fn to_update(&self) -> ServiceSlotUpdate {
        ServiceSlotUpdate {
            id: self.id,
            slot_name: self.slot_name.clone(),
            price: format_price(self.price),
            is_active: self.is_active,
        }
    }
}

/// A service as listed by `GET /schools/{id}/services`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service id.
    pub id: ServiceId,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Session length in minutes.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub duration: u32,
    /// Base cost.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    /// Owning school.
    #[serde(default)]
    pub school_id: Option<SchoolId>,
    /// Contact number for the service.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Parents may book ahead of the usual window.
    #[serde(default)]
    pub advanced_booking_enabled: bool,
    /// Per-bucket prices.
    #[serde(default)]
    pub slots: Vec<ServiceSlot>,
}

impl Service {
    /// Price rows in bucket order; unknown labels sort last.
    pub fn sorted_slots(&self) -> Vec<&ServiceSlot> {
        let mut slots: Vec<&ServiceSlot> = self.slots.iter().collect();
        slots.sort_by_key(|s| TimeBucket::order_of(&s.slot_name));
        slots
    }
}

/// Editable service fields shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Service name is required"))]
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Base cost.
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: f64,
    /// Contact number.
    pub phone_number: String,
    /// Parents may book ahead of the usual window.
    pub advanced_booking_enabled: bool,
}

impl From<&Service> for ServiceDraft {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone().unwrap_or_default(),
            cost: service.cost,
            phone_number: service.phone_number.clone().unwrap_or_default(),
            advanced_booking_enabled: service.advanced_booking_enabled,
        }
    }
}

/// Body of `POST /schools/{id}/service`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    /// Editable fields.
    #[serde(flatten)]
    pub draft: ServiceDraft,
    /// Always [`DEFAULT_SERVICE_DURATION`].
    pub duration: u32,
    /// Owning school.
    pub school_id: SchoolId,
    /// Price per bucket label, as decimal strings.
    pub slot_prices: BTreeMap<String, String>,
}

impl NewService {
    /// Create payload; buckets without an explicit price are sent as `"0"`.
    pub fn new(draft: ServiceDraft, school_id: SchoolId, prices: &[(TimeBucket, f64)]) -> Self {
        let mut slot_prices: BTreeMap<String, String> = TimeBucket::ALL
            .iter()
            .map(|b| (b.label().to_string(), "0".to_string()))
            .collect();
        for (bucket, price) in prices {
            slot_prices.insert(bucket.label().to_string(), format_price(*price));
        }
        Self {
            draft,
            duration: DEFAULT_SERVICE_DURATION,
            school_id,
            slot_prices,
        }
    }
}

/// One entry of `slotUpdates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSlotUpdate {
    /// Row id.
    pub id: SlotId,
    /// Bucket label.
    pub slot_name: String,
    /// New price, as a decimal string.
    pub price: String,
    /// New active flag.
    pub is_active: bool,
}

/// Body of `PUT /schools/service/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    /// Editable fields.
    #[serde(flatten)]
    pub draft: ServiceDraft,
    /// Always [`DEFAULT_SERVICE_DURATION`].
    pub duration: u32,
    /// Owning school.
    pub school_id: SchoolId,
    /// Per-bucket price and active changes.
    pub slot_updates: Vec<ServiceSlotUpdate>,
}

impl ServiceUpdate {
    /// Update payload carrying every price row of `service` in bucket order.
    pub fn new(draft: ServiceDraft, school_id: SchoolId, service: &Service) -> Self {
        Self {
            draft,
            duration: DEFAULT_SERVICE_DURATION,
            school_id,
            slot_updates: service.sorted_slots().into_iter().map(ServiceSlot::to_update).collect(),
        }
    }

    /// Change the price of the row for `bucket`; false when absent.
    pub fn set_price(&mut self, bucket: TimeBucket, price: f64) -> bool {
        self.row_mut(bucket)
            .map(|row| row.price = format_price(price))
            .is_some()
    }

    /// Change the active flag of the row for `bucket`; false when absent.
    pub fn set_active(&mut self, bucket: TimeBucket, active: bool) -> bool {
        self.row_mut(bucket).map(|row| row.is_active = active).is_some()
    }

    fn row_mut(&mut self, bucket: TimeBucket) -> Option<&mut ServiceSlotUpdate> {
        self.slot_updates
            .iter_mut()
            .find(|row| row.slot_name == bucket.label())
    }
}

fn format_price(price: f64) -> String {
    format!("{price}")
}

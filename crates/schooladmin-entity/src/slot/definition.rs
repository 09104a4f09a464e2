//! Recurring slot definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use schooladmin_core::types::{ServiceId, SlotId};

use super::bucket::TimeBucket;
use super::range::DateRange;
use super::weekday::WeekdaySet;
use crate::serde_helpers::{lenient_u32, null_as_empty, optional_date};

/// A recurring availability template: bucket, validity window, weekday
/// pattern, and base capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDefinition {
    /// Definition id.
    pub id: SlotId,
    /// Bucket label.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slot_name: String,
    /// `HH:MM`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start_time: String,
    /// `HH:MM`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub end_time: String,
    /// Base seats per occurrence.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub capacity: u32,
    /// Inactive definitions accept no bookings.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Owning service.
    #[serde(default)]
    pub service_id: Option<ServiceId>,
    /// First valid day.
    #[serde(default, deserialize_with = "optional_date")]
    pub from_date: Option<NaiveDate>,
    /// Last valid day.
    #[serde(default, deserialize_with = "optional_date")]
    pub end_date: Option<NaiveDate>,
    /// Days of week the definition repeats on.
    #[serde(default = "WeekdaySet::empty")]
    pub weekdays: WeekdaySet,
}

fn default_active() -> bool {
    true
}

/// Body of `GET /schools/{id}/slots`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotListResponse {
    /// Definitions on this page.
    #[serde(default)]
    pub slots: Vec<SlotDefinition>,
}

/// Body of `POST /schools/{id}/slots`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlot {
    /// Owning service.
    pub service_id: ServiceId,
    /// Bucket label.
    pub slot_name: String,
    /// `HH:MM`.
    pub start_time: String,
    /// `HH:MM`.
    pub end_time: String,
    /// Seats per occurrence.
    pub capacity: u32,
    /// New definitions start active.
    pub is_active: bool,
    /// First valid day, `YYYY-MM-DD`.
    pub from_date: String,
    /// Last valid day, `YYYY-MM-DD`.
    pub end_date: String,
    /// Repeat pattern.
    pub weekdays: WeekdaySet,
}

impl NewSlot {
    /// Definition for one bucket of a schedule.
    pub fn for_bucket(
        service_id: ServiceId,
        bucket: TimeBucket,
        capacity: u32,
        range: &DateRange,
        weekdays: &WeekdaySet,
    ) -> Self {
        Self {
            service_id,
            slot_name: bucket.label().to_string(),
            start_time: bucket.start_time().to_string(),
            end_time: bucket.end_time().to_string(),
            capacity,
            is_active: true,
            from_date: range.start_wire(),
            end_date: range.end_wire(),
            weekdays: weekdays.clone(),
        }
    }
}

/// Body of `PUT /schools/slots/{id}`: the only two fields this console edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotUpdate {
    /// Base seats.
    pub capacity: u32,
    /// Active flag.
    pub is_active: bool,
}

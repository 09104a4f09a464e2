//! Dates on which a school or one of its services takes no bookings.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use schooladmin_core::types::{BlockId, SchoolId, ServiceId};

use crate::serde_helpers::{DATE_FORMAT, optional_date};

/// Body of `POST /schools/schedule/block`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDateRequest {
    pub school_id: SchoolId,
    /// `None` blocks every service.
    pub service_id: Option<ServiceId>,
    /// `YYYY-MM-DD`.
    pub blocked_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BlockDateRequest {
    /// Build a request; a blank reason is omitted.
    pub fn new(
        school_id: SchoolId,
        service_id: Option<ServiceId>,
        date: NaiveDate,
        reason: Option<String>,
    ) -> Self {
        Self {
            school_id,
            service_id,
            blocked_date: date.format(DATE_FORMAT).to_string(),
            reason: reason.filter(|r| !r.trim().is_empty()),
        }
    }
}

/// One blocked date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDate {
    /// Needed to unblock.
    #[serde(default)]
    pub id: Option<BlockId>,
    #[serde(default)]
    pub school_id: Option<SchoolId>,
    #[serde(default)]
    pub service_id: Option<ServiceId>,
    #[serde(default, deserialize_with = "optional_date")]
    pub blocked_date: Option<NaiveDate>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Body of `GET /schools/{id}/schedule`.
///
/// Accepts a bare array or an object carrying `blockedDates`; anything else
/// reads as an empty schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOverview {
    pub blocked_dates: Vec<BlockedDate>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScheduleShape {
    List(Vec<BlockedDate>),
    Wrapped {
        #[serde(rename = "blockedDates", default)]
        blocked_dates: Vec<BlockedDate>,
    },
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for ScheduleOverview {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let blocked_dates = match ScheduleShape::deserialize(deserializer)? {
            ScheduleShape::List(items) | ScheduleShape::Wrapped { blocked_dates: items } => items,
            ScheduleShape::Other(_) => Vec::new(),
        };
        Ok(Self { blocked_dates })
    }
}

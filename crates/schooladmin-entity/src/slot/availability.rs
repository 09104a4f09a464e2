//! Date-scoped capacity of slot definitions.

use serde::{Deserialize, Serialize};

use schooladmin_core::error::AppError;
use schooladmin_core::types::SlotId;

use super::range::DateRange;
use crate::serde_helpers::{lenient_u32, null_as_empty};

/// One row of `GET /schools/{id}/slots/availability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    /// Slot definition id.
    #[serde(rename = "id")]
    pub slot_id: SlotId,
    /// Bucket label.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slot_name: String,
    /// `HH:MM`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start_time: String,
    /// `HH:MM`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub end_time: String,
    /// Seats on this date; zero means cancelled.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub current_capacity: u32,
    /// Seats already taken.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub booked_count: u32,
    /// Seats still free.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub available: u32,
}

/// Availability rows sharing one time window, merged for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRow {
    /// First row seen for the window; its id is the one updates target.
    #[serde(flatten)]
    pub slot: SlotAvailability,
    /// Every definition id sharing `start_time-end_time`.
    pub ids: Vec<SlotId>,
}

impl AvailabilityRow {
    /// Dedup key.
    pub fn window_key(&self) -> String {
        format!("{}-{}", self.slot.start_time, self.slot.end_time)
    }

    /// A zero-capacity slot is cancelled for the date.
    pub fn is_cancelled(&self) -> bool {
        self.slot.current_capacity == 0
    }

    /// Check a capacity edit; zero is a cancellation.
    pub fn validate_capacity(&self, new_capacity: u32) -> Result<(), AppError> {
        if new_capacity == 0 {
            return self.validate_cancel();
        }
        if new_capacity < self.slot.booked_count {
            return Err(AppError::validation(format!(
                "Capacity cannot be below the {} seats already booked",
                self.slot.booked_count
            )));
        }
        Ok(())
    }

    /// Check that the slot may be cancelled.
    pub fn validate_cancel(&self) -> Result<(), AppError> {
        if self.slot.booked_count > 0 {
            return Err(AppError::validation(format!(
                "Cannot cancel: {} active bookings",
                self.slot.booked_count
            )));
        }
        if self.is_cancelled() {
            return Err(AppError::validation("Slot is already cancelled"));
        }
        Ok(())
    }

    /// Merge raw rows by time window, keeping first-seen order.
    pub fn dedupe(rows: Vec<SlotAvailability>) -> Vec<AvailabilityRow> {
        let mut merged: Vec<AvailabilityRow> = Vec::new();
        for slot in rows {
            let key = format!("{}-{}", slot.start_time, slot.end_time);
            match merged.iter_mut().find(|row| row.window_key() == key) {
                Some(row) => row.ids.push(slot.slot_id),
                None => merged.push(AvailabilityRow {
                    ids: vec![slot.slot_id],
                    slot,
                }),
            }
        }
        merged
    }
}

/// One capacity override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityChange {
    /// Target definition.
    pub slot_id: SlotId,
    /// New seats for each date in range; zero cancels.
    pub new_capacity: u32,
}

/// Body of `PUT /schools/{id}/slots/availability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    /// Left empty when a range is given.
    pub date: String,
    /// Overrides to apply.
    pub updates: Vec<AvailabilityChange>,
    /// First day of the range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// Last day of the range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl AvailabilityUpdate {
    /// Update applied over every date of `range`.
    pub fn over_range(range: &DateRange, updates: Vec<AvailabilityChange>) -> Self {
        Self {
            date: String::new(),
            updates,
            from_date: Some(range.start_wire()),
            end_date: Some(range.end_wire()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn row(id: i64, start: &str, end: &str, capacity: u32, booked: u32) -> SlotAvailability {
        SlotAvailability {
            slot_id: SlotId(id),
            slot_name: String::new(),
            start_time: start.into(),
            end_time: end.into(),
            current_capacity: capacity,
            booked_count: booked,
            available: capacity.saturating_sub(booked),
        }
    }

    #[test]
    fn test_dedupe_collects_ids_per_window() {
        let rows = AvailabilityRow::dedupe(vec![
            row(1, "09:00", "12:00", 15, 0),
            row(2, "12:00", "15:00", 15, 0),
            row(3, "09:00", "12:00", 10, 2),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ids, vec![SlotId(1), SlotId(3)]);
        assert_eq!(rows[0].slot.current_capacity, 15);
        assert_eq!(rows[1].ids, vec![SlotId(2)]);
    }

    #[test]
    fn test_capacity_floor_is_booked_count() {
        let rows = AvailabilityRow::dedupe(vec![row(1, "09:00", "12:00", 15, 4)]);
        assert!(rows[0].validate_capacity(3).unwrap_err().is_validation());
        assert!(rows[0].validate_capacity(4).is_ok());
        assert!(rows[0].validate_capacity(0).is_err());
    }

    #[test]
    fn test_cancel_rules() {
        let rows = AvailabilityRow::dedupe(vec![
            row(1, "09:00", "12:00", 15, 0),
            row(2, "12:00", "15:00", 0, 0),
        ]);
        assert!(rows[0].validate_cancel().is_ok());
        assert!(rows[1].validate_cancel().is_err());
    }

    #[test]
    fn test_update_wire_shape() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let range = DateRange::new(start, start, 30).unwrap();
        let update = AvailabilityUpdate::over_range(
            &range,
            vec![AvailabilityChange {
                slot_id: SlotId(9),
                new_capacity: 0,
            }],
        );
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "date": "",
                "updates": [{"slotId": 9, "newCapacity": 0}],
                "fromDate": "2025-04-01",
                "endDate": "2025-04-01"
            })
        );
    }

    #[test]
    fn test_parse_row() {
        let parsed: SlotAvailability = serde_json::from_value(json!({
            "id": "5",
            "slotName": "3:00 PM - 6:00 PM",
            "startTime": "15:00",
            "endTime": "18:00",
            "currentCapacity": 12,
            "bookedCount": 3,
            "available": 9
        }))
        .unwrap();
        assert_eq!(parsed.slot_id, SlotId(5));
        assert_eq!(parsed.available, 9);
    }
}

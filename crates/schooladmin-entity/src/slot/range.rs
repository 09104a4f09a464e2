//! Inclusive calendar date ranges with the form's selection limits.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use schooladmin_core::error::AppError;

use super::weekday::{Weekday, WeekdaySet};
use crate::serde_helpers::DATE_FORMAT;

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day.
    pub start: NaiveDate,
    /// Last day, never before `start`.
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range spanning at most `max_days` calendar days.
    ///
    /// With `max_days = 30` the end may be at most 29 days after the start.
    pub fn new(start: NaiveDate, end: NaiveDate, max_days: u32) -> Result<Self, AppError> {
        if end < start {
            return Err(AppError::validation(
                "End date must not be before the start date",
            ));
        }
        if !Self::is_selectable(start, end, max_days) {
            return Err(AppError::validation(format!(
                "Date range cannot exceed {max_days} days"
            )));
        }
        Ok(Self { start, end })
    }

    /// A one-day range.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Whether `candidate` may be picked once `anchor` is chosen: it must
    /// lie within `max_days - 1` days of the anchor, in either direction.
    pub fn is_selectable(anchor: NaiveDate, candidate: NaiveDate, max_days: u32) -> bool {
        let span = i64::from(max_days.saturating_sub(1));
        (candidate - anchor).num_days().abs() <= span
    }

    /// Number of calendar days covered.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Reject ranges starting before `today`.
    pub fn ensure_not_past(&self, today: NaiveDate) -> Result<(), AppError> {
        if self.start < today {
            return Err(AppError::validation("Past dates cannot be edited"));
        }
        Ok(())
    }

    /// Every date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len_days()).map(move |offset| self.start + Duration::days(offset))
    }

    /// Dates in the range that fall on one of the selected weekdays.
    pub fn occurrences(&self, weekdays: &WeekdaySet) -> Vec<NaiveDate> {
        self.days()
            .filter(|d| weekdays.contains(Weekday::from(chrono::Datelike::weekday(d))))
            .collect()
    }

    /// Start date in wire format.
    pub fn start_wire(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End date in wire format.
    pub fn end_wire(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

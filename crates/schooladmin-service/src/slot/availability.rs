//! Edit-availability workflow: per-date capacity overrides and cancellations.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use schooladmin_auth::BusyFlag;
use schooladmin_core::config::SchedulingConfig;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::types::{ServiceId, SlotId};
use schooladmin_entity::slot::{
    AvailabilityChange, AvailabilityRow, AvailabilityUpdate, DateRange, TimeBucket,
};

use super::service::SlotService;
use crate::context::AdminContext;

/// Dates and service an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityEdit {
    /// Service whose slots are edited.
    pub service_id: ServiceId,
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive; equal to `start` for a single day.
    pub end: NaiveDate,
}

impl AvailabilityEdit {
    /// Edit one date.
    pub fn single(service_id: ServiceId, date: NaiveDate) -> Self {
        Self {
            service_id,
            start: date,
            end: date,
        }
    }

    /// Edit every date from `start` to `end`.
    pub fn range(service_id: ServiceId, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            service_id,
            start,
            end,
        }
    }
}

/// Picks one row of the availability snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSelector {
    /// Any definition id merged into the row.
    Id(SlotId),
    /// The row covering a bucket's time window.
    Bucket(TimeBucket),
}

impl SlotSelector {
    fn matches(&self, row: &AvailabilityRow) -> bool {
        match self {
            Self::Id(id) => row.ids.contains(id),
            Self::Bucket(bucket) => {
                row.slot.start_time.starts_with(bucket.start_time())
                    && row.slot.end_time.starts_with(bucket.end_time())
            }
        }
    }
}

impl fmt::Display for SlotSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "slot {id}"),
            Self::Bucket(bucket) => write!(f, "{bucket}"),
        }
    }
}

impl FromStr for SlotSelector {
    type Err = String;

    /// A numeric id, or anything [`TimeBucket`] parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(id) => Ok(Self::Id(SlotId(id))),
            Err(_) => s.parse::<TimeBucket>().map(Self::Bucket),
        }
    }
}

/// Changes seats on specific dates without touching the slot definition.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    slots: SlotService,
    config: SchedulingConfig,
    busy: Arc<BusyFlag>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(slots: SlotService, config: SchedulingConfig) -> Self {
        Self {
            slots,
            config,
            busy: Arc::new(BusyFlag::new()),
        }
    }

    /// Rows for the first date of the edit; the same windows apply to the
    /// whole range.
    pub async fn snapshot(
        &self,
        ctx: &AdminContext,
        edit: &AvailabilityEdit,
    ) -> AppResult<Vec<AvailabilityRow>> {
        let range = self.checked_range(edit)?;
        self.slots
            .availability(ctx, range.start, Some(edit.service_id))
            .await
    }

    /// Set seats for the selected window on every date of the edit.
    pub async fn set_capacity(
        &self,
        ctx: &AdminContext,
        edit: &AvailabilityEdit,
        selector: SlotSelector,
        capacity: u32,
    ) -> AppResult<AvailabilityRow> {
        let range = self.checked_range(edit)?;
        let _busy = self.busy.try_acquire("Availability update")?;
        let row = self.select(ctx, edit, &range, selector).await?;
        row.validate_capacity(capacity)?;
        self.send(ctx, &range, &row, capacity).await?;
        info!(
            school_id = %ctx.school_id,
            slot_id = %row.slot.slot_id,
            from = %range.start,
            to = %range.end,
            capacity,
            "Availability updated"
        );
        Ok(row)
    }

    /// Cancel the selected window on every date of the edit.
    pub async fn cancel(
        &self,
        ctx: &AdminContext,
        edit: &AvailabilityEdit,
        selector: SlotSelector,
    ) -> AppResult<AvailabilityRow> {
        let range = self.checked_range(edit)?;
        let _busy = self.busy.try_acquire("Availability update")?;
        let row = self.select(ctx, edit, &range, selector).await?;
        row.validate_cancel()?;
        self.send(ctx, &range, &row, 0).await?;
        info!(
            school_id = %ctx.school_id,
            slot_id = %row.slot.slot_id,
            from = %range.start,
            to = %range.end,
            "Slot cancelled"
        );
        Ok(row)
    }

    fn checked_range(&self, edit: &AvailabilityEdit) -> AppResult<DateRange> {
        let range = DateRange::new(edit.start, edit.end, self.config.max_range_days)?;
        range.ensure_not_past(Local::now().date_naive())?;
        Ok(range)
    }

    async fn select(
        &self,
        ctx: &AdminContext,
        edit: &AvailabilityEdit,
        range: &DateRange,
        selector: SlotSelector,
    ) -> AppResult<AvailabilityRow> {
        self.slots
            .availability(ctx, range.start, Some(edit.service_id))
            .await?
            .into_iter()
            .find(|row| selector.matches(row))
            .ok_or_else(|| {
                AppError::not_found(format!("No {selector} on {}", range.start))
            })
    }

    async fn send(
        &self,
        ctx: &AdminContext,
        range: &DateRange,
        row: &AvailabilityRow,
        capacity: u32,
    ) -> AppResult<()> {
        let update = AvailabilityUpdate::over_range(
            range,
            vec![AvailabilityChange {
                slot_id: row.slot.slot_id,
                new_capacity: capacity,
            }],
        );
        self.slots.update_availability(ctx, &update).await
    }
}

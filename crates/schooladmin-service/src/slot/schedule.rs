//! Create-schedule workflow: one slot definition per time bucket.
//!
//! Buckets are created concurrently. When some succeed and others fail,
//! the successful ones are deleted again (unless disabled in config) so a
//! schedule is either fully present or absent.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use schooladmin_auth::BusyFlag;
use schooladmin_core::config::SchedulingConfig;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::types::{ServiceId, SlotId};
use schooladmin_entity::slot::{DateRange, NewSlot, TimeBucket, WeekdaySet};

use super::service::SlotService;
use crate::context::AdminContext;

/// Form input for a new schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    /// Service the slots belong to.
    pub service_id: ServiceId,
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive.
    pub end: NaiveDate,
    /// Days of the week the slots recur on.
    pub weekdays: WeekdaySet,
    /// Seats per bucket; zero skips the bucket.
    pub capacities: BTreeMap<TimeBucket, u32>,
}

impl ScheduleRequest {
    /// Request with the form defaults: Monday to Friday, every bucket at
    /// the configured capacity.
    pub fn new(
        service_id: ServiceId,
        start: NaiveDate,
        end: NaiveDate,
        config: &SchedulingConfig,
    ) -> Self {
        Self {
            service_id,
            start,
            end,
            weekdays: WeekdaySet::working_days(),
            capacities: TimeBucket::ALL
                .into_iter()
                .map(|b| (b, config.default_bucket_capacity))
                .collect(),
        }
    }

    /// Replace the recurring weekdays.
    pub fn with_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = weekdays;
        self
    }

    /// Set seats for one bucket; zero leaves it out.
    pub fn with_capacity(mut self, bucket: TimeBucket, seats: u32) -> Self {
        self.capacities.insert(bucket, seats);
        self
    }

    fn planned(&self) -> Vec<(TimeBucket, u32)> {
        self.capacities
            .iter()
            .filter(|(_, seats)| **seats > 0)
            .map(|(b, s)| (*b, *s))
            .collect()
    }

    fn skipped(&self) -> Vec<TimeBucket> {
        self.capacities
            .iter()
            .filter(|(_, seats)| **seats == 0)
            .map(|(b, _)| *b)
            .collect()
    }
}

/// A bucket whose slot definition now exists (or existed before rollback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSlot {
    /// Time window of the slot.
    pub bucket: TimeBucket,
    /// Absent when the backend response carried no id.
    pub slot_id: Option<SlotId>,
}

/// A bucket whose call failed.
#[derive(Debug, Clone)]
pub struct BucketFailure {
    /// Time window the call was for.
    pub bucket: TimeBucket,
    /// Error the call returned.
    pub error: AppError,
}

/// What a schedule submission did, bucket by bucket.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOutcome {
    /// Buckets created successfully.
    pub created: Vec<CreatedSlot>,
    /// Buckets submitted with zero seats.
    pub skipped: Vec<TimeBucket>,
    /// Buckets whose create call failed.
    pub failed: Vec<BucketFailure>,
    /// Created buckets deleted again after a failure.
    pub rolled_back: Vec<TimeBucket>,
    /// Created buckets that could not be deleted again.
    pub rollback_failed: Vec<BucketFailure>,
}

impl ScheduleOutcome {
    /// Every planned bucket was created.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Nothing was submitted.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.failed.is_empty()
    }

    /// Created buckets still present on the backend.
    pub fn remaining(&self) -> Vec<TimeBucket> {
        self.created
            .iter()
            .map(|c| c.bucket)
            .filter(|b| !self.rolled_back.contains(b))
            .collect()
    }

    /// `Ok` when complete, otherwise the first failure with a summary.
    pub fn into_result(self) -> AppResult<Self> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        let first = &self.failed[0];
        let remaining = self.remaining();
        let rollback_attempted = !self.rolled_back.is_empty() || !self.rollback_failed.is_empty();
        let tail = if remaining.is_empty() {
            "no slots were kept".to_string()
        } else if rollback_attempted {
            format!(
                "{} slot(s) could not be removed and remain",
                remaining.len()
            )
        } else {
            format!("{} slot(s) were kept", remaining.len())
        };
        Err(AppError {
            message: format!(
                "{} ({} of {} buckets failed; {tail})",
                first.error.message,
                self.failed.len(),
                self.failed.len() + self.created.len(),
            ),
            ..first.error.clone()
        })
    }
}

/// Creates recurring schedules.
#[derive(Debug, Clone)]
pub struct ScheduleService {
    slots: SlotService,
    config: SchedulingConfig,
    busy: Arc<BusyFlag>,
}

impl ScheduleService {
    /// Creates a new schedule service.
    pub fn new(slots: SlotService, config: SchedulingConfig) -> Self {
        Self {
            slots,
            config,
            busy: Arc::new(BusyFlag::new()),
        }
    }

    /// Submit a schedule. Input problems fail before any call; per-bucket
    /// results are reported in the outcome.
    pub async fn create(
        &self,
        ctx: &AdminContext,
        request: &ScheduleRequest,
    ) -> AppResult<ScheduleOutcome> {
        let range = DateRange::new(request.start, request.end, self.config.max_range_days)?;
        if request.weekdays.is_empty() {
            return Err(AppError::validation(
                "Please select at least one weekday to create a schedule",
            ));
        }

        let mut outcome = ScheduleOutcome {
            skipped: request.skipped(),
            ..Default::default()
        };
        let planned = request.planned();
        if planned.is_empty() {
            info!(school_id = %ctx.school_id, "All buckets at zero seats; nothing to create");
            return Ok(outcome);
        }

        let _busy = self.busy.try_acquire("Schedule creation")?;

        let calls = planned.iter().map(|(bucket, seats)| {
            let payload =
                NewSlot::for_bucket(request.service_id, *bucket, *seats, &range, &request.weekdays);
            async move { (*bucket, self.slots.create(ctx, &payload).await) }
        });
        for (bucket, result) in join_all(calls).await {
            match result {
                Ok(body) => outcome.created.push(CreatedSlot {
                    bucket,
                    slot_id: created_slot_id(&body),
                }),
                Err(error) => {
                    warn!(school_id = %ctx.school_id, %bucket, error = %error, "Slot creation failed");
                    outcome.failed.push(BucketFailure { bucket, error });
                }
            }
        }

        if !outcome.failed.is_empty() && !outcome.created.is_empty() {
            if self.config.rollback_on_partial_failure {
                self.roll_back(&mut outcome).await;
            } else {
                warn!(
                    school_id = %ctx.school_id,
                    kept = outcome.created.len(),
                    "Partial schedule kept; rollback disabled"
                );
            }
        }

        if outcome.is_complete() {
            info!(
                school_id = %ctx.school_id,
                service_id = %request.service_id,
                from = %range.start,
                to = %range.end,
                weekdays = %request.weekdays,
                buckets = outcome.created.len(),
                "Schedule created"
            );
        }
        Ok(outcome)
    }

    async fn roll_back(&self, outcome: &mut ScheduleOutcome) {
        let deletes = outcome.created.iter().map(|created| async move {
            let result = match created.slot_id {
                Some(id) => self.slots.delete(id).await,
                None => Err(AppError::internal(format!(
                    "No id was returned for {}; remove it from the slot list",
                    created.bucket
                ))),
            };
            (created.bucket, result)
        });
        for (bucket, result) in join_all(deletes).await {
            match result {
                Ok(()) => outcome.rolled_back.push(bucket),
                Err(error) => {
                    warn!(%bucket, error = %error, "Rollback of created slot failed");
                    outcome.rollback_failed.push(BucketFailure { bucket, error });
                }
            }
        }
        info!(
            rolled_back = outcome.rolled_back.len(),
            rollback_failed = outcome.rollback_failed.len(),
            "Partial schedule rolled back"
        );
    }
}

/// Id of a freshly created slot: top level, or under `slot` or `data`.
fn created_slot_id(body: &Value) -> Option<SlotId> {
    [&body["id"], &body["slot"]["id"], &body["data"]["id"]]
        .into_iter()
        .find(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

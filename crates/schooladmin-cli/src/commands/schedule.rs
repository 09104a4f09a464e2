//! Schedule creation and per-date availability commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::result::AppResult;
use schooladmin_core::types::ServiceId;
use schooladmin_entity::slot::{AvailabilityRow, TimeBucket, Weekday, WeekdaySet};
use schooladmin_service::{AvailabilityEdit, ScheduleOutcome, ScheduleRequest, SlotSelector};

use super::{parse_bucket_seats, parse_weekday};
use crate::app::App;
use crate::output::{OutputFormat, print_list, print_success, print_warning};

/// Arguments for `schedule`
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommands,
}

/// Schedule subcommands
#[derive(Debug, Subcommand)]
pub enum ScheduleCommands {
    /// Create one slot definition per bucket over a date range
    Create(CreateArgs),
    /// Show seats and bookings for a date
    Availability {
        #[command(flatten)]
        dates: DateArgs,
    },
    /// Override seats for one window over a date range
    Edit {
        #[command(flatten)]
        dates: DateArgs,
        /// Slot ID or bucket name
        slot: SlotSelector,
        /// New seat count
        capacity: u32,
    },
    /// Cancel one window over a date range
    Cancel {
        #[command(flatten)]
        dates: DateArgs,
        /// Slot ID or bucket name
        slot: SlotSelector,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Service ID
    #[arg(long)]
    pub service: ServiceId,
    /// First date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,
    /// Last date (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
    /// Weekdays, comma separated (default Mon-Fri)
    #[arg(long, value_delimiter = ',', value_parser = parse_weekday)]
    pub days: Vec<Weekday>,
    /// BUCKET=SEATS (repeatable); zero skips the bucket
    #[arg(long = "capacity", value_parser = parse_bucket_seats)]
    pub capacities: Vec<(TimeBucket, u32)>,
}

#[derive(Debug, Args)]
pub struct DateArgs {
    /// Service ID
    #[arg(long)]
    pub service: ServiceId,
    /// First date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,
    /// Last date; defaults to the first
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl DateArgs {
    fn edit(&self) -> AvailabilityEdit {
        match self.to {
            Some(to) => AvailabilityEdit::range(self.service, self.from, to),
            None => AvailabilityEdit::single(self.service, self.from),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct AvailabilityView {
    #[tabled(rename = "Slot")]
    slot_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Time")]
    window: String,
    #[tabled(rename = "Seats")]
    capacity: u32,
    #[tabled(rename = "Booked")]
    booked: u32,
    #[tabled(rename = "Free")]
    available: u32,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&AvailabilityRow> for AvailabilityView {
    fn from(row: &AvailabilityRow) -> Self {
        let ids = row
            .ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        Self {
            slot_id: ids,
            name: row.slot.slot_name.clone(),
            window: format!("{}-{}", row.slot.start_time, row.slot.end_time),
            capacity: row.slot.current_capacity,
            booked: row.slot.booked_count,
            available: row.slot.available,
            status: if row.is_cancelled() { "cancelled" } else { "open" },
        }
    }
}

fn report(outcome: &ScheduleOutcome) {
    for created in &outcome.created {
        if outcome.rolled_back.contains(&created.bucket) {
            print_warning(&format!("{}: created, then removed again", created.bucket));
        } else {
            print_success(&format!("{}: created", created.bucket));
        }
    }
    for bucket in &outcome.skipped {
        println!("  {bucket}: skipped (0 seats)");
    }
    for failure in &outcome.failed {
        print_warning(&format!("{}: {}", failure.bucket, failure.error));
    }
    for failure in &outcome.rollback_failed {
        print_warning(&format!(
            "{}: could not be removed: {}",
            failure.bucket, failure.error
        ));
    }
}

pub async fn execute(app: &App, args: &ScheduleArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    match &args.command {
        ScheduleCommands::Create(flags) => {
            let mut request =
                ScheduleRequest::new(flags.service, flags.from, flags.to, &app.config.scheduling);
            if !flags.days.is_empty() {
                request = request.with_weekdays(flags.days.iter().copied().collect::<WeekdaySet>());
            }
            for (bucket, seats) in &flags.capacities {
                request = request.with_capacity(*bucket, *seats);
            }

            let outcome = app.schedule.create(&ctx, &request).await?;
            if outcome.is_noop() {
                print_warning("Every bucket has 0 seats; nothing was created");
                return Ok(());
            }
            report(&outcome);
            let outcome = outcome.into_result()?;
            print_success(&format!(
                "Schedule created: {} slot(s) from {} to {} on {}",
                outcome.created.len(),
                flags.from,
                flags.to,
                request.weekdays
            ));
        }
        ScheduleCommands::Availability { dates } => {
            let rows = app.availability.snapshot(&ctx, &dates.edit()).await?;
            let view: Vec<AvailabilityView> = rows.iter().map(AvailabilityView::from).collect();
            print_list(&view, format);
        }
        ScheduleCommands::Edit {
            dates,
            slot,
            capacity,
        } => {
            let edit = dates.edit();
            let row = app
                .availability
                .set_capacity(&ctx, &edit, *slot, *capacity)
                .await?;
            print_success(&format!(
                "{} set to {capacity} seats from {} to {}",
                row.slot.slot_name, edit.start, edit.end
            ));
        }
        ScheduleCommands::Cancel { dates, slot } => {
            let edit = dates.edit();
            let row = app.availability.cancel(&ctx, &edit, *slot).await?;
            print_success(&format!(
                "{} cancelled from {} to {}",
                row.slot.slot_name, edit.start, edit.end
            ));
        }
    }
    Ok(())
}

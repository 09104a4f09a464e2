//! Bookings, statistics, and revenue commands.

use chrono::{Datelike, Local};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::result::AppResult;
use schooladmin_core::types::{PageRequest, ServiceId};
use schooladmin_entity::booking::{Booking, BookingTab};
use schooladmin_entity::stats::{ChartPoint, RevenuePoint, StatsFilter};

use crate::app::App;
use crate::output::{OutputFormat, or_dash, print_item, print_kv, print_list};

/// Arguments for `bookings`
#[derive(Debug, Args)]
pub struct BookingsArgs {
    /// all, upcoming, completed, or cancelled
    #[arg(long, default_value = "all")]
    pub tab: BookingTab,
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

/// Filters shared by `stats` and `revenue`
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only this service
    #[arg(long)]
    pub service: Option<ServiceId>,
    /// Year; defaults to the current one
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

impl FilterArgs {
    fn filter(&self, status: Option<String>) -> StatsFilter {
        StatsFilter {
            service: self.service,
            year: Some(self.year.unwrap_or_else(|| Local::now().year())),
            month: self.month,
            status,
        }
    }
}

/// Arguments for `stats`
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Booking status filter
    #[arg(long)]
    pub status: Option<String>,
}

/// Arguments for `revenue`
#[derive(Debug, Args)]
pub struct RevenueArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct BookingRow {
    #[tabled(rename = "Booking")]
    display_id: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Child")]
    child: String,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "Amount")]
    amount: f64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Payment")]
    payment: String,
}

impl From<&Booking> for BookingRow {
    fn from(booking: &Booking) -> Self {
        let parent = booking
            .parent
            .father_name
            .as_deref()
            .or(booking.parent.mother_name.as_deref());
        Self {
            display_id: booking.display_id.clone(),
            service: booking.service_name.clone(),
            date: or_dash(booking.date),
            slot: booking.slot_name.clone(),
            child: or_dash(booking.child.name.as_deref()),
            parent: or_dash(parent),
            amount: booking.amount,
            status: booking.status.to_string(),
            payment: or_dash(booking.payment_status),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct ChartRow {
    #[tabled(rename = "Period")]
    name: String,
    #[tabled(rename = "Bookings")]
    count: u32,
    #[tabled(rename = "Revenue")]
    revenue: String,
}

impl From<&ChartPoint> for ChartRow {
    fn from(point: &ChartPoint) -> Self {
        Self {
            name: point.name.clone(),
            count: point.count,
            revenue: or_dash(point.revenue),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct RevenueRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Revenue")]
    revenue: f64,
    #[tabled(rename = "Transactions")]
    count: usize,
}

impl From<&RevenuePoint> for RevenueRow {
    fn from(point: &RevenuePoint) -> Self {
        Self {
            month: point.month.clone(),
            revenue: point.revenue,
            count: point.count,
        }
    }
}

pub async fn bookings(app: &App, args: &BookingsArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    let page = app
        .dashboard
        .bookings(&ctx, PageRequest::new(args.page, args.limit), args.tab)
        .await?;

    match format {
        OutputFormat::Json => print_item(&page, format),
        OutputFormat::Table => {
            let rows: Vec<BookingRow> = page.bookings.iter().map(BookingRow::from).collect();
            print_list(&rows, format);
            println!(
                "Page {} of {} ({} bookings, {})",
                page.page,
                page.total_pages,
                page.total,
                args.tab.as_str()
            );
        }
    }
    Ok(())
}

pub async fn stats(app: &App, args: &StatsArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    let summary = app
        .dashboard
        .stats(&ctx, &args.filter.filter(args.status.clone()))
        .await?;

    match format {
        OutputFormat::Json => print_item(&summary, format),
        OutputFormat::Table => {
            print_kv("Total bookings", &summary.total_bookings.to_string());
            print_kv("Upcoming", &summary.upcoming_count.to_string());
            let rows: Vec<ChartRow> = summary.chart.iter().map(ChartRow::from).collect();
            print_list(&rows, format);
        }
    }
    Ok(())
}

pub async fn revenue(app: &App, args: &RevenueArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    let series = app.dashboard.revenue(&ctx, &args.filter.filter(None)).await?;
    let rows: Vec<RevenueRow> = series.iter().map(RevenueRow::from).collect();
    print_list(&rows, format);
    if format == OutputFormat::Table && !series.is_empty() {
        let total: f64 = series.iter().map(|p| p.revenue).sum();
        print_kv("Total", &total.to_string());
    }
    Ok(())
}

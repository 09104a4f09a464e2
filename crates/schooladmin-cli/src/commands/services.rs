//! Service catalog commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::result::AppResult;
use schooladmin_core::types::ServiceId;
use schooladmin_entity::catalog::{Service, ServiceDraft};
use schooladmin_entity::slot::TimeBucket;
use schooladmin_service::ServiceChanges;

use super::parse_bucket_price;
use crate::app::App;
use crate::output::{OutputFormat, or_dash, print_item, print_list, print_success, print_warning};
use crate::prompt;

/// Arguments for `services`
#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServiceCommands,
}

/// Service subcommands
#[derive(Debug, Subcommand)]
pub enum ServiceCommands {
    /// List services with their bucket prices
    List,
    /// Show one service
    Show {
        /// Service ID
        id: ServiceId,
    },
    /// Create a service
    Create(CreateArgs),
    /// Edit a service; unset flags keep their current value
    Update(UpdateArgs),
    /// Delete a service
    Delete {
        /// Service ID
        id: ServiceId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Display name
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Base cost
    #[arg(long, default_value_t = 0.0)]
    pub cost: f64,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Allow bookings ahead of the usual window
    #[arg(long)]
    pub advanced_booking: bool,
    /// BUCKET=AMOUNT price (repeatable)
    #[arg(long = "price", value_parser = parse_bucket_price)]
    pub prices: Vec<(TimeBucket, f64)>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Service ID
    pub id: ServiceId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub cost: Option<f64>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Enable or disable advance booking
    #[arg(long)]
    pub advanced_booking: Option<bool>,
    /// BUCKET=AMOUNT price (repeatable)
    #[arg(long = "price", value_parser = parse_bucket_price)]
    pub prices: Vec<(TimeBucket, f64)>,
    /// Activate a bucket (repeatable)
    #[arg(long = "enable")]
    pub enable: Vec<TimeBucket>,
    /// Deactivate a bucket (repeatable)
    #[arg(long = "disable")]
    pub disable: Vec<TimeBucket>,
}

#[derive(Debug, Serialize, Tabled)]
struct ServiceRow {
    #[tabled(rename = "ID")]
    id: ServiceId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cost")]
    cost: f64,
    #[tabled(rename = "Minutes")]
    duration: u32,
    #[tabled(rename = "Advance")]
    advanced_booking: bool,
    #[tabled(rename = "Prices")]
    prices: String,
}

impl From<&Service> for ServiceRow {
    fn from(service: &Service) -> Self {
        let prices = service
            .sorted_slots()
            .iter()
            .map(|s| {
                let state = if s.is_active { "" } else { " (off)" };
                format!("{} {}{state}", s.slot_name, s.price)
            })
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: service.id,
            name: service.name.clone(),
            cost: service.cost,
            duration: service.duration,
            advanced_booking: service.advanced_booking_enabled,
            prices: or_dash(Some(prices).filter(|p| !p.is_empty())),
        }
    }
}

pub async fn execute(app: &App, args: &ServicesArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    match &args.command {
        ServiceCommands::List => {
            let services = app.catalog.list(&ctx).await?;
            let rows: Vec<ServiceRow> = services.iter().map(ServiceRow::from).collect();
            print_list(&rows, format);
        }
        ServiceCommands::Show { id } => {
            let service = app.catalog.find(&ctx, *id).await?;
            print_item(&service, format);
        }
        ServiceCommands::Create(flags) => {
            let draft = ServiceDraft {
                name: flags.name.clone(),
                description: flags.description.clone(),
                cost: flags.cost,
                phone_number: flags.phone.clone(),
                advanced_booking_enabled: flags.advanced_booking,
            };
            app.catalog.create(&ctx, draft, &flags.prices).await?;
            print_success(&format!("Service '{}' created", flags.name.trim()));
        }
        ServiceCommands::Update(flags) => {
            let active = flags
                .enable
                .iter()
                .map(|b| (*b, true))
                .chain(flags.disable.iter().map(|b| (*b, false)))
                .collect();
            let changes = ServiceChanges {
                name: flags.name.clone(),
                description: flags.description.clone(),
                cost: flags.cost,
                phone_number: flags.phone.clone(),
                advanced_booking_enabled: flags.advanced_booking,
                prices: flags.prices.clone(),
                active,
            };
            if changes == ServiceChanges::default() {
                print_warning("Nothing to update");
                return Ok(());
            }
            app.catalog.update(&ctx, flags.id, &changes).await?;
            print_success(&format!("Service {} updated", flags.id));
        }
        ServiceCommands::Delete { id, yes } => {
            if !prompt::confirm(*yes, &format!("Delete service {id}?"))? {
                print_warning("Cancelled");
                return Ok(());
            }
            app.catalog.delete(&ctx, *id).await?;
            print_success(&format!("Service {id} deleted"));
        }
    }
    Ok(())
}

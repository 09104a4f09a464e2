//! Master slot definition commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::result::AppResult;
use schooladmin_core::types::{ServiceId, SlotId};
use schooladmin_entity::slot::{SlotDefinition, SlotUpdate};

use crate::app::App;
use crate::output::{OutputFormat, or_dash, print_list, print_success, print_warning};
use crate::prompt;

/// Arguments for `slots`
#[derive(Debug, Args)]
pub struct SlotsArgs {
    #[command(subcommand)]
    pub command: SlotCommands,
}

/// Slot subcommands
#[derive(Debug, Subcommand)]
pub enum SlotCommands {
    /// List slot definitions
    List {
        /// Only slots of this service
        #[arg(long)]
        service: Option<ServiceId>,
    },
    /// Change default capacity or active flag
    Update {
        /// Slot ID
        id: SlotId,
        /// Default seats
        #[arg(long)]
        capacity: Option<u32>,
        /// Active flag
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a slot definition
    Delete {
        /// Slot ID
        id: SlotId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct SlotRow {
    #[tabled(rename = "ID")]
    id: SlotId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Time")]
    window: String,
    #[tabled(rename = "Seats")]
    capacity: u32,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Days")]
    weekdays: String,
}

impl From<&SlotDefinition> for SlotRow {
    fn from(slot: &SlotDefinition) -> Self {
        Self {
            id: slot.id,
            name: slot.slot_name.clone(),
            window: format!("{}-{}", slot.start_time, slot.end_time),
            capacity: slot.capacity,
            active: slot.is_active,
            from: or_dash(slot.from_date),
            to: or_dash(slot.end_date),
            weekdays: slot.weekdays.to_string(),
        }
    }
}

pub async fn execute(app: &App, args: &SlotsArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    match &args.command {
        SlotCommands::List { service } => {
            let slots = app.slots.list(&ctx, *service).await?;
            let rows: Vec<SlotRow> = slots.iter().map(SlotRow::from).collect();
            print_list(&rows, format);
        }
        SlotCommands::Update {
            id,
            capacity,
            active,
        } => {
            if capacity.is_none() && active.is_none() {
                print_warning("Nothing to update");
                return Ok(());
            }
            let slot = app.slots.find(&ctx, *id).await?;
            let update = SlotUpdate {
                capacity: capacity.unwrap_or(slot.capacity),
                is_active: active.unwrap_or(slot.is_active),
            };
            app.slots.update(*id, update).await?;
            print_success(&format!("Slot {id} updated"));
        }
        SlotCommands::Delete { id, yes } => {
            if !prompt::confirm(*yes, &format!("Delete slot {id}?"))? {
                print_warning("Cancelled");
                return Ok(());
            }
            app.slots.delete(*id).await?;
            print_success(&format!("Slot {id} deleted"));
        }
    }
    Ok(())
}

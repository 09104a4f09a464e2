//! Blocked date commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::result::AppResult;
use schooladmin_core::types::{BlockId, ServiceId};
use schooladmin_entity::school::BlockedDate;

use crate::app::App;
use crate::output::{OutputFormat, or_dash, print_list, print_success, print_warning};
use crate::prompt;

/// Arguments for `block`
#[derive(Debug, Args)]
pub struct BlockArgs {
    #[command(subcommand)]
    pub command: BlockCommands,
}

/// Blocked date subcommands
#[derive(Debug, Subcommand)]
pub enum BlockCommands {
    /// List blocked dates
    List,
    /// Block a date for the school or one service
    Add {
        /// Date to block (YYYY-MM-DD)
        date: NaiveDate,
        /// Only this service; the whole school when omitted
        #[arg(long)]
        service: Option<ServiceId>,
        /// Shown to parents
        #[arg(long)]
        reason: Option<String>,
    },
    /// Unblock a date
    Remove {
        /// Block ID from `block list`
        id: BlockId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct BlockRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&BlockedDate> for BlockRow {
    fn from(block: &BlockedDate) -> Self {
        Self {
            id: or_dash(block.id),
            date: or_dash(block.blocked_date),
            service: block
                .service_id
                .map_or_else(|| "all".to_string(), |id| id.to_string()),
            reason: or_dash(block.reason.as_deref()),
        }
    }
}

pub async fn execute(app: &App, args: &BlockArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    match &args.command {
        BlockCommands::List => {
            let overview = app.blocks.list(&ctx).await?;
            let rows: Vec<BlockRow> = overview.blocked_dates.iter().map(BlockRow::from).collect();
            print_list(&rows, format);
        }
        BlockCommands::Add {
            date,
            service,
            reason,
        } => {
            app.blocks.block(&ctx, *service, *date, reason.clone()).await?;
            print_success(&format!("{date} blocked"));
        }
        BlockCommands::Remove { id, yes } => {
            if !prompt::confirm(*yes, &format!("Unblock {id}?"))? {
                print_warning("Cancelled");
                return Ok(());
            }
            app.blocks.unblock(&ctx, *id).await?;
            print_success(&format!("Block {id} removed"));
        }
    }
    Ok(())
}

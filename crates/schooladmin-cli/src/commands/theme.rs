//! Colour scheme preference.

use clap::{Args, Subcommand};

use schooladmin_core::result::AppResult;
use schooladmin_entity::preference::ThemePreference;

use crate::app::App;
use crate::output::print_success;

/// Arguments for `theme`
#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: Option<ThemeCommands>,
}

/// Theme subcommands; shows the current theme when omitted
#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// Use a specific theme
    Set {
        /// light or dark
        theme: ThemePreference,
    },
    /// Switch between light and dark
    Toggle,
}

pub async fn execute(app: &App, args: &ThemeArgs) -> AppResult<()> {
    match &args.command {
        None => println!("{}", app.preferences.theme().await),
        Some(ThemeCommands::Set { theme }) => {
            app.preferences.set_theme(*theme).await?;
            print_success(&format!("Theme set to {theme}"));
        }
        Some(ThemeCommands::Toggle) => {
            let theme = app.preferences.toggle_theme().await?;
            print_success(&format!("Theme set to {theme}"));
        }
    }
    Ok(())
}

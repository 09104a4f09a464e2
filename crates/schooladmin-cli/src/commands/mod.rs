//! CLI command definitions and dispatch.

pub mod account;
pub mod block;
pub mod dashboard;
pub mod schedule;
pub mod school;
pub mod services;
pub mod slots;
pub mod theme;

use std::str::FromStr;

use clap::{Parser, Subcommand};

use schooladmin_core::result::AppResult;
use schooladmin_entity::slot::{TimeBucket, Weekday};

use crate::app::App;
use crate::output::OutputFormat;

/// School Admin: manage a school's services, slots, and bookings
#[derive(Debug, Parser)]
#[command(name = "schooladmin", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with a username or mobile number
    Login(account::LoginArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Replace the initial password after the first login
    ResetPassword(account::ResetPasswordArgs),
    /// Change the password (signs out afterwards)
    Password(account::PasswordArgs),
    /// Edit the administrator profile
    Profile(account::ProfileArgs),
    /// School profile
    School(school::SchoolArgs),
    /// Service catalog
    Services(services::ServicesArgs),
    /// Master slot definitions
    Slots(slots::SlotsArgs),
    /// Schedules and per-date availability
    Schedule(schedule::ScheduleArgs),
    /// Blocked dates
    Block(block::BlockArgs),
    /// Bookings table
    Bookings(dashboard::BookingsArgs),
    /// Booking statistics
    Stats(dashboard::StatsArgs),
    /// Monthly revenue
    Revenue(dashboard::RevenueArgs),
    /// Colour scheme preference
    Theme(theme::ThemeArgs),
}

impl Cli {
    /// Restore the session, then execute the command.
    pub async fn execute(&self, app: &App) -> AppResult<()> {
        app.session.initialize().await;

        let format = self.format;
        match &self.command {
            Commands::Login(args) => account::login(app, args).await,
            Commands::Logout => account::logout(app).await,
            Commands::Whoami => account::whoami(app, format).await,
            Commands::ResetPassword(args) => account::reset_password(app, args).await,
            Commands::Password(args) => account::change_password(app, args).await,
            Commands::Profile(args) => account::profile(app, args, format).await,
            Commands::School(args) => school::execute(app, args, format).await,
            Commands::Services(args) => services::execute(app, args, format).await,
            Commands::Slots(args) => slots::execute(app, args, format).await,
            Commands::Schedule(args) => schedule::execute(app, args, format).await,
            Commands::Block(args) => block::execute(app, args, format).await,
            Commands::Bookings(args) => dashboard::bookings(app, args, format).await,
            Commands::Stats(args) => dashboard::stats(app, args, format).await,
            Commands::Revenue(args) => dashboard::revenue(app, args, format).await,
            Commands::Theme(args) => theme::execute(app, args).await,
        }
    }
}

/// `bucket=value`, e.g. `morning=250` or `18:00=10`.
fn parse_bucket_pair<T: FromStr>(raw: &str) -> Result<(TimeBucket, T), String> {
    let (bucket, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected BUCKET=VALUE, got '{raw}'"))?;
    let bucket = bucket.parse::<TimeBucket>()?;
    let value = value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("invalid value '{value}' for {bucket}"))?;
    Ok((bucket, value))
}

pub(crate) fn parse_bucket_price(raw: &str) -> Result<(TimeBucket, f64), String> {
    parse_bucket_pair(raw)
}

pub(crate) fn parse_bucket_seats(raw: &str) -> Result<(TimeBucket, u32), String> {
    parse_bucket_pair(raw)
}

pub(crate) fn parse_weekday(raw: &str) -> Result<Weekday, String> {
    Weekday::parse(raw).ok_or_else(|| format!("unknown weekday '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bucket_pairs() {
        assert_eq!(
            parse_bucket_price("morning=250.5").unwrap(),
            (TimeBucket::Morning, 250.5)
        );
        assert_eq!(parse_bucket_seats("18:00=0").unwrap(), (TimeBucket::Evening, 0));
        assert!(parse_bucket_seats("evening").is_err());
        assert!(parse_bucket_seats("evening=-1").is_err());
        assert_eq!(parse_weekday("saturday").unwrap(), Weekday::Sat);
    }

    #[test]
    fn test_schedule_create_parses() {
        let cli = Cli::try_parse_from([
            "schooladmin",
            "schedule",
            "create",
            "--service",
            "5",
            "--from",
            "2030-03-01",
            "--to",
            "2030-03-14",
            "--days",
            "Sat,Sun",
            "--capacity",
            "evening=0",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Schedule(_)));
        assert_eq!(cli.format, OutputFormat::Table);
    }

    fn test_app() -> App {
        use std::sync::Arc;

        use schooladmin_auth::MemoryKeyValueStore;
        use schooladmin_core::config::AppConfig;
        use schooladmin_http::mock::MockTransport;

        App::build(
            AppConfig::default(),
            Arc::new(MockTransport::new()),
            Arc::new(MemoryKeyValueStore::new()),
        )
    }

    #[tokio::test]
    async fn test_theme_commands_work_signed_out() {
        let app = test_app();
        let cli = Cli::try_parse_from(["schooladmin", "theme", "set", "light"]).unwrap();
        cli.execute(&app).await.unwrap();
        assert_eq!(
            app.preferences.theme().await,
            schooladmin_entity::preference::ThemePreference::Light
        );

        let cli = Cli::try_parse_from(["schooladmin", "theme", "toggle"]).unwrap();
        cli.execute(&app).await.unwrap();
        assert_eq!(
            app.preferences.theme().await,
            schooladmin_entity::preference::ThemePreference::Dark
        );
    }

    #[tokio::test]
    async fn test_dashboard_commands_require_sign_in() {
        let app = test_app();
        let cli = Cli::try_parse_from(["schooladmin", "-f", "json", "services", "list"]).unwrap();
        let err = cli.execute(&app).await.unwrap_err();
        assert_eq!(err.kind, schooladmin_core::error::ErrorKind::Authentication);
    }
}

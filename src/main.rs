//! School Admin console entry point.
//!
//! Parses the command line, loads configuration, sets up logging, and
//! runs one command against the backend.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use schooladmin_cli::output::print_error;
use schooladmin_cli::{App, Cli};
use schooladmin_core::config::{AppConfig, LogFormat};
use schooladmin_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&cli, config).await {
        tracing::debug!(kind = %e.kind, status = ?e.status, "Command failed");
        print_error(&e.message);
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay, and variables
fn load_configuration(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("SCHOOLADMIN_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Initialize tracing/logging. Logs go to stderr so command output stays
/// clean for piping.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    tracing::debug!("Starting schooladmin v{}", env!("CARGO_PKG_VERSION"));
    let app = App::from_config(config)?;
    cli.execute(&app).await
}

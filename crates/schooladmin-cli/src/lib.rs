//! # schooladmin-cli
//!
//! Command tree, prompts, and table/JSON output for the school admin
//! console. [`App`] wires the session and services once; every command
//! borrows it.

pub mod app;
pub mod commands;
pub mod output;
pub mod prompt;

pub use app::App;
pub use commands::Cli;
pub use output::OutputFormat;

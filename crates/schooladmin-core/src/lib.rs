//! # schooladmin-core
//!
//! Core crate for the school admin console. Contains configuration schemas,
//! typed identifiers, the storage and transport traits implemented by the
//! other crates, and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

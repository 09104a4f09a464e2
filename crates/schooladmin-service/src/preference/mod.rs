//! Operator preferences stored next to the session.

pub mod service;

pub use service::{PreferenceService, THEME_KEY};

//! Diagnostic log settings.

use serde::{Deserialize, Serialize};

/// Output shape of the diagnostic log written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable events.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"warn"` or `"schooladmin_service=debug"`.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

// Commands print their own results; only problems are logged by default.
fn default_level() -> String {
    "warn".to_string()
}

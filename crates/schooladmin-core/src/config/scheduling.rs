//! Scheduling form configuration.

use serde::{Deserialize, Serialize};

/// Limits and defaults applied by the scheduling workflows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Maximum number of calendar days in a selectable range, start included.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
    /// Seats pre-filled for every time bucket in the create-schedule form.
    #[serde(default = "default_bucket_capacity")]
    pub default_bucket_capacity: u32,
    /// Delete already-created slots when a later bucket fails.
    #[serde(default = "default_true")]
    pub rollback_on_partial_failure: bool,
    /// Page size used when listing master slots.
    #[serde(default = "default_slot_page_limit")]
    pub slot_page_limit: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_range_days: default_max_range_days(),
            default_bucket_capacity: default_bucket_capacity(),
            rollback_on_partial_failure: true,
            slot_page_limit: default_slot_page_limit(),
        }
    }
}

fn default_max_range_days() -> u32 {
    30
}

fn default_bucket_capacity() -> u32 {
    15
}

fn default_true() -> bool {
    true
}

fn default_slot_page_limit() -> u32 {
    100
}

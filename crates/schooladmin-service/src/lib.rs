//! # schooladmin-service
//!
//! Workflow layer of the school admin console. Each service wraps the
//! [`ApiClient`](schooladmin_http::ApiClient) with the validation and
//! multi-call orchestration of one dashboard area.
//!
//! Services take their dependencies at construction time and receive an
//! [`AdminContext`] per call, so the school they act on is always the one
//! the signed-in administrator manages.

pub mod catalog;
pub mod context;
pub mod dashboard;
pub mod preference;
pub mod school;
pub mod slot;

pub use catalog::{CatalogService, ServiceChanges};
pub use context::AdminContext;
pub use dashboard::DashboardService;
pub use preference::PreferenceService;
pub use school::{ImageUpload, SchoolService};
pub use slot::{
    AvailabilityEdit, AvailabilityService, BlockService, ScheduleOutcome, ScheduleRequest,
    ScheduleService, SlotSelector, SlotService,
};

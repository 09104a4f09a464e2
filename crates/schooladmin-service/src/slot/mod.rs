//! Slot definitions, schedules, date-scoped availability, and blocked dates.

pub mod availability;
pub mod block;
pub mod schedule;
pub mod service;

pub use availability::{AvailabilityEdit, AvailabilityService, SlotSelector};
pub use block::BlockService;
pub use schedule::{BucketFailure, CreatedSlot, ScheduleOutcome, ScheduleRequest, ScheduleService};
pub use service::SlotService;

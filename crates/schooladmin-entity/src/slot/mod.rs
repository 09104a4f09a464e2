//! Slot definitions, date-scoped availability, and scheduling inputs.

pub mod availability;
pub mod bucket;
pub mod definition;
pub mod range;
pub mod weekday;

pub use availability::{AvailabilityChange, AvailabilityRow, AvailabilityUpdate, SlotAvailability};
pub use bucket::TimeBucket;
pub use definition::{NewSlot, SlotDefinition, SlotListResponse, SlotUpdate};
pub use range::DateRange;
pub use weekday::{Weekday, WeekdaySet};

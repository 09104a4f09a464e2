//! School profile, its editable sections, and blocked dates.

pub mod details;
pub mod images;
pub mod profile;
pub mod schedule;

pub use details::{AboutDetails, AddressDetails, Location};
pub use images::{ImageFields, ImageSlot};
pub use profile::{SchoolProfile, SchoolProfileEnvelope};
pub use schedule::{BlockDateRequest, BlockedDate, ScheduleOverview};

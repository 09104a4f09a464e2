//! Read-only booking projections for the dashboard.

pub mod model;
pub mod status;

pub use model::{Booking, BookingPage, BookingPageResponse, BookingRecord, ChildSnapshot, ParentSnapshot};
pub use status::{BookingStatus, BookingTab, PaymentStatus};

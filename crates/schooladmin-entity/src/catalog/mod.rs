//! Bookable services offered by a school and their per-bucket prices.

pub mod service;

pub use service::{NewService, Service, ServiceDraft, ServiceSlot, ServiceSlotUpdate, ServiceUpdate};

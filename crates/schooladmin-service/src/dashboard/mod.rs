//! Bookings table and dashboard charts.

pub mod service;

pub use service::DashboardService;

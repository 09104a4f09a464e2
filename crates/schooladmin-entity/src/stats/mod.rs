//! Dashboard statistics and revenue series.

pub mod chart;
pub mod filter;
pub mod revenue;

pub use chart::{ChartPoint, StatsResponse, StatsSummary};
pub use filter::StatsFilter;
pub use revenue::{RevenueMonth, RevenuePoint, revenue_series};

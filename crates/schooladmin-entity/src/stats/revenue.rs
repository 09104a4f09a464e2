//! Monthly revenue returned by `GET /schools/{id}/revenue`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::{lenient_f64, null_as_empty};

/// One month as sent by the backend, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueMonth {
    /// `YYYY-MM`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub month: String,
    /// Sum of payments in the month.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: f64,
    /// Individual payments; only the count is used.
    #[serde(default)]
    pub transactions: Vec<Value>,
}

/// One point of the revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    /// Short month name (`Jan`); the raw value when it cannot be parsed.
    pub month: String,
    /// Total for the month.
    pub revenue: f64,
    /// Number of transactions in the month.
    pub count: usize,
}

impl From<RevenueMonth> for RevenuePoint {
    fn from(raw: RevenueMonth) -> Self {
        let month = short_month(&raw.month).unwrap_or(raw.month);
        Self {
            month,
            revenue: raw.total,
            count: raw.transactions.len(),
        }
    }
}

fn short_month(raw: &str) -> Option<String> {
    let (_, month) = raw.trim().split_once('-')?;
    let number: u8 = month.get(..2).unwrap_or(month).parse().ok()?;
    let name = chrono::Month::try_from(number).ok()?.name();
    Some(name.chars().take(3).collect())
}

/// Map the backend's newest-first list into chronological chart points.
pub fn revenue_series(months: Vec<RevenueMonth>) -> Vec<RevenuePoint> {
    months.into_iter().rev().map(RevenuePoint::from).collect()
}

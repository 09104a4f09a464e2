//! Booking chart returned by `GET /schools/{id}/stats`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::lenient_u32;

#[derive(Debug, Clone, Deserialize)]
struct RawChartPoint {
    #[serde(default)]
    name: Value,
    #[serde(default, deserialize_with = "lenient_u32")]
    bookings: u32,
    #[serde(default)]
    revenue: Option<Value>,
}

/// Wire body of the stats endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(default)]
    chart_data: Vec<RawChartPoint>,
    #[serde(default, deserialize_with = "lenient_u32")]
    total_bookings: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    upcoming_count: u32,
}

/// One bar of the bookings chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Axis label, always a string.
    pub name: String,
    /// Bookings in the bucket.
    pub count: u32,
    /// Revenue in the bucket, when reported.
    pub revenue: Option<f64>,
}

/// Headline numbers plus the chart series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_bookings: u32,
    pub upcoming_count: u32,
    pub chart: Vec<ChartPoint>,
}

/// Render a chart label: strings verbatim, everything else as compact JSON.
fn label_of(name: Value) -> String {
    match name {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl From<StatsResponse> for StatsSummary {
    fn from(response: StatsResponse) -> Self {
        let chart = response
            .chart_data
            .into_iter()
            .map(|point| ChartPoint {
                name: label_of(point.name),
                count: point.bookings,
                revenue: point.revenue.and_then(|v| match v {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                }),
            })
            .collect();
        Self {
            total_bookings: response.total_bookings,
            upcoming_count: response.upcoming_count,
            chart,
        }
    }
}

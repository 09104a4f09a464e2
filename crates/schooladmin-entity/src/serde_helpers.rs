//! Lenient deserializers for fields the backend encodes inconsistently.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Wire date format used in every request body and query string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD`, tolerating a trailing time component
/// (`2025-01-31T00:00:00.000Z`).
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}

/// Optional date that may arrive as a plain date, a timestamp, `null`, or
/// an empty string. Unparseable values become `None`.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_wire_date))
}

/// Number that may arrive as a JSON number, a numeric string, or `null`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Count that may arrive as a number, a numeric string, or `null`.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    })
}

/// String that may be `null`; `null` becomes the empty string.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

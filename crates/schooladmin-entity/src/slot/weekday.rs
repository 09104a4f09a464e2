//! Weekday selection for recurring slot definitions.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Day of the week as the backend spells it (`"Mon"` .. `"Sun"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    /// Three-letter label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        }
    }

    /// Parse a label case-insensitively; accepts full names too.
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        let key = lower.get(..3)?;
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

/// Ordered, duplicate-free set of weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdaySet(BTreeSet<Weekday>);

impl WeekdaySet {
    /// No days selected.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Monday to Friday, the form default.
    pub fn working_days() -> Self {
        Self::ALL_WORKING.iter().copied().collect()
    }

    const ALL_WORKING: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Toggle one day on or off.
    pub fn set(&mut self, day: Weekday, enabled: bool) {
        if enabled {
            self.0.insert(day);
        } else {
            self.0.remove(&day);
        }
    }

    /// Whether the day is selected.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected days.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Selected days, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        Self::working_days()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.iter().map(|d| d.as_str()).collect();
        write!(f, "{}", labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Weekday::parse("mon"), Some(Weekday::Mon));
        assert_eq!(Weekday::parse("Saturday"), Some(Weekday::Sat));
        assert_eq!(Weekday::parse("xx"), None);
    }

    #[test]
    fn test_set_is_ordered_and_serializes_labels() {
        let set: WeekdaySet = [Weekday::Fri, Weekday::Mon, Weekday::Fri].into_iter().collect();
        assert_eq!(set.len(), 2);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!(["Mon", "Fri"]));
    }

    #[test]
    fn test_default_is_working_days() {
        let set = WeekdaySet::default();
        assert!(set.contains(Weekday::Mon));
        assert!(!set.contains(Weekday::Sat));
        assert_eq!(set.len(), 5);
    }
}

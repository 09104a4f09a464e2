//! The fixed time-of-day buckets offered by every school.

use std::fmt;
use std::str::FromStr;

/// One of the four daily time windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeBucket {
    /// 09:00 to 12:00.
    Morning,
    /// 12:00 to 15:00.
    Midday,
    /// 15:00 to 18:00.
    Afternoon,
    /// 18:00 to 21:00.
    Evening,
}

impl TimeBucket {
    /// All buckets in chronological order.
    pub const ALL: [TimeBucket; 4] = [Self::Morning, Self::Midday, Self::Afternoon, Self::Evening];

    /// Slot name sent to and matched from the backend.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "9:00 AM - 12:00 PM",
            Self::Midday => "12:00 PM - 3:00 PM",
            Self::Afternoon => "3:00 PM - 6:00 PM",
            Self::Evening => "6:00 PM - 9:00 PM",
        }
    }

    /// Start time, `HH:MM`.
    pub fn start_time(&self) -> &'static str {
        match self {
            Self::Morning => "09:00",
            Self::Midday => "12:00",
            Self::Afternoon => "15:00",
            Self::Evening => "18:00",
        }
    }

    /// End time, `HH:MM`.
    pub fn end_time(&self) -> &'static str {
        match self {
            Self::Morning => "12:00",
            Self::Midday => "15:00",
            Self::Afternoon => "18:00",
            Self::Evening => "21:00",
        }
    }

    /// Find the bucket whose label matches a backend slot name.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label.trim())
    }

    /// Sort position of a slot name; unknown names sort last.
    pub fn order_of(label: &str) -> usize {
        Self::from_label(label).map_or(Self::ALL.len(), |b| b as usize)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TimeBucket {
    type Err = String;

    /// Accepts `morning|midday|afternoon|evening`, a start time, or a label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let by_name = match key.to_ascii_lowercase().as_str() {
            "morning" => Some(Self::Morning),
            "midday" | "noon" => Some(Self::Midday),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            _ => None,
        };
        by_name
            .or_else(|| Self::ALL.into_iter().find(|b| b.start_time() == key))
            .or_else(|| Self::from_label(key))
            .ok_or_else(|| format!("unknown time bucket '{key}'"))
    }
}

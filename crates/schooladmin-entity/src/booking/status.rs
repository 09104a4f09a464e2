//! Booking and payment status enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Confirmed and not yet delivered.
    Booked,
    /// Session took place.
    Completed,
    /// Cancelled by either side.
    Cancelled,
    /// Any status this client does not know.
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    /// Label shown to operators; `booked` reads as `upcoming`.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Booked => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

/// Payment state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Settled.
    Paid,
    /// Awaiting payment.
    Pending,
    /// Returned to the parent.
    Refunded,
    /// Unrecognized value.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Refunded => "refunded",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Filter tab sent as the `status` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingTab {
    /// No filter.
    All,
    /// Future bookings.
    #[default]
    Upcoming,
    /// Past bookings.
    Completed,
    /// Cancelled bookings.
    Cancelled,
}

impl BookingTab {
    /// Query value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "upcoming" | "booked" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown booking status '{other}'")),
        }
    }
}

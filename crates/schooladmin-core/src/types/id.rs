//! Newtype wrappers around the backend's numeric identifiers.
//!
//! Using distinct types prevents accidentally passing a `SlotId` where a
//! `ServiceId` is expected. The backend is inconsistent about whether ids
//! arrive as JSON numbers or numeric strings, so every id deserializes from
//! either form and always serializes as a number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Wire form of an identifier before normalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Parse an id that may be a JSON number or a numeric string.
fn deserialize_raw_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric id: '{s}'"))),
    }
}

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Return the inner numeric value.
            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserialize_raw_id(deserializer).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for an administrator account.
    UserId
);

define_id!(
    /// Unique identifier for a school.
    SchoolId
);

define_id!(
    /// Unique identifier for a bookable service.
    ServiceId
);

define_id!(
    /// Unique identifier for a slot definition.
    SlotId
);

define_id!(
    /// Unique identifier for a blocked-date record.
    BlockId
);

define_id!(
    /// Unique numeric identifier for a booking.
    BookingId
);

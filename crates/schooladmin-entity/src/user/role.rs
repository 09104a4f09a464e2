//! Backend role recognised by this console.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The single role permitted to sign in to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    /// School administrator.
    #[default]
    #[serde(rename = "school_admin")]
    SchoolAdmin,
}

impl UserRole {
    /// Return the role as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchoolAdmin => "school_admin",
        }
    }

    /// Parse a backend role string; any other role is not recognised.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "school_admin" => Some(Self::SchoolAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

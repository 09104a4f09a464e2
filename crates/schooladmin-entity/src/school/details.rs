//! Editable sections of the school profile.

use serde::Serialize;
use validator::{Validate, ValidationError};

use super::profile::SchoolProfile;

/// Name and address section, sent to `PUT /schools/{id}/profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressDetails {
    #[validate(length(min = 1, message = "School name is required"))]
    pub name: String,
    pub tag: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    pub landmark: String,
    pub bus_stand: String,
    pub metro_station: String,
    pub school_number: String,
}

impl From<&SchoolProfile> for AddressDetails {
    fn from(profile: &SchoolProfile) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: profile.name.clone(),
            tag: text(&profile.tag),
            address: profile.address.clone(),
            city: profile.city.clone(),
            landmark: text(&profile.landmark),
            bus_stand: text(&profile.bus_stand),
            metro_station: text(&profile.metro_station),
            school_number: text(&profile.school_number),
        }
    }
}

/// About lists. Blank entries are dropped before sending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutDetails {
    pub achievements: Vec<String>,
    #[validate(custom(function = "non_blank_list", message = "At least one amenity is required"))]
    pub amenities: Vec<String>,
    #[validate(custom(
        function = "non_blank_list",
        message = "At least one offered service is required"
    ))]
    pub services_offered: Vec<String>,
}

impl AboutDetails {
    /// Copy with blank entries removed and the rest trimmed.
    pub fn normalized(&self) -> Self {
        let clean = |items: &[String]| {
            items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        Self {
            achievements: clean(&self.achievements),
            amenities: clean(&self.amenities),
            services_offered: clean(&self.services_offered),
        }
    }
}

impl From<&SchoolProfile> for AboutDetails {
    fn from(profile: &SchoolProfile) -> Self {
        Self {
            achievements: profile.achievements.clone().unwrap_or_default(),
            amenities: profile.amenities.clone().unwrap_or_default(),
            services_offered: profile.services_offered.clone().unwrap_or_default(),
        }
    }
}

fn non_blank_list(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|s| !s.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::new("empty_list"))
    }
}

/// Map pin, sent to `PUT /schools/{id}/location`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Validate)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

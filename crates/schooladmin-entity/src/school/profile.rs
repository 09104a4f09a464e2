//! The school profile as returned by the backend.

use serde::{Deserialize, Serialize};

use schooladmin_core::types::SchoolId;

use crate::serde_helpers::null_as_empty;

/// Full profile of `GET /schools/{id}/profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolProfile {
    /// School id.
    #[serde(default)]
    pub id: Option<SchoolId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub bus_stand: Option<String>,
    #[serde(default)]
    pub metro_station: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub principal_photo: Option<String>,
    #[serde(default)]
    pub image1: Option<String>,
    #[serde(default)]
    pub image2: Option<String>,
    #[serde(default)]
    pub image3: Option<String>,
    #[serde(default)]
    pub image4: Option<String>,
    #[serde(default)]
    pub image5: Option<String>,
    #[serde(default)]
    pub image6: Option<String>,
    #[serde(default)]
    pub image7: Option<String>,
    #[serde(default)]
    pub image8: Option<String>,
    #[serde(default)]
    pub image9: Option<String>,
    #[serde(default)]
    pub image10: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Null lists arrive as empty.
    #[serde(default)]
    pub achievements: Option<Vec<String>>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub services_offered: Option<Vec<String>>,
    #[serde(default)]
    pub school_number: Option<String>,
}

impl SchoolProfile {
    /// Gallery image URLs in slot order, skipping empty slots.
    pub fn gallery(&self) -> Vec<&str> {
        [
            &self.image1,
            &self.image2,
            &self.image3,
            &self.image4,
            &self.image5,
            &self.image6,
            &self.image7,
            &self.image8,
            &self.image9,
            &self.image10,
        ]
        .into_iter()
        .filter_map(|url| url.as_deref().filter(|u| !u.is_empty()))
        .collect()
    }

    /// Both coordinates, when set.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// `{ school }` wrapper returned by profile and location updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolProfileEnvelope {
    /// Updated profile.
    #[serde(default)]
    pub school: Option<SchoolProfile>,
}

//! Image fields of the school profile.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Where an uploaded image is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    /// School logo.
    Logo,
    /// Principal's photo.
    Principal,
    /// Gallery position, 1 to 10.
    Gallery(u8),
}

impl ImageSlot {
    /// Number of gallery positions.
    pub const GALLERY_SIZE: u8 = 10;
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logo => write!(f, "logo"),
            Self::Principal => write!(f, "principal"),
            Self::Gallery(n) => write!(f, "image{n}"),
        }
    }
}

impl FromStr for ImageSlot {
    type Err = String;

    /// `logo`, `principal`, or `image1` .. `image10` (a bare number also works).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "logo" => return Ok(Self::Logo),
            "principal" | "principal_photo" => return Ok(Self::Principal),
            _ => {}
        }
        let digits = key.strip_prefix("image").unwrap_or(&key);
        match digits.parse::<u8>() {
            Ok(n) if (1..=Self::GALLERY_SIZE).contains(&n) => Ok(Self::Gallery(n)),
            _ => Err(format!("unknown image slot '{s}'")),
        }
    }
}

/// Image URL fields sent to `PUT /schools/{id}/profile`. Unset fields are
/// omitted so existing images stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image7: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image8: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image9: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image10: Option<String>,
}

impl ImageFields {
    /// Record `url` for `slot`. Out-of-range gallery positions are ignored.
    pub fn set(&mut self, slot: ImageSlot, url: String) {
        let field = match slot {
            ImageSlot::Logo => &mut self.logo_url,
            ImageSlot::Principal => &mut self.principal_photo,
            ImageSlot::Gallery(1) => &mut self.image1,
            ImageSlot::Gallery(2) => &mut self.image2,
            ImageSlot::Gallery(3) => &mut self.image3,
            ImageSlot::Gallery(4) => &mut self.image4,
            ImageSlot::Gallery(5) => &mut self.image5,
            ImageSlot::Gallery(6) => &mut self.image6,
            ImageSlot::Gallery(7) => &mut self.image7,
            ImageSlot::Gallery(8) => &mut self.image8,
            ImageSlot::Gallery(9) => &mut self.image9,
            ImageSlot::Gallery(10) => &mut self.image10,
            ImageSlot::Gallery(_) => return,
        };
        *field = Some(url);
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

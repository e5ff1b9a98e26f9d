//! Location model for geographic coordinates and gazetteer entries

use serde::{Deserialize, Serialize};

use crate::VoiceGuideError;

/// Point on the map, serialized as `{"lat": .., "lng": ..}`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject coordinates outside the WGS84 ranges
    pub fn validate(&self) -> crate::Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(VoiceGuideError::validation(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(VoiceGuideError::validation(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }

        Ok(())
    }
}

impl From<Coordinates> for haversine::Location {
    fn from(coordinates: Coordinates) -> Self {
        haversine::Location {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}

/// A named point of interest from the gazetteer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GazetteerEntry {
    /// Unique key, e.g. `burj-khalifa`
    pub id: String,
    /// Display name
    pub name: String,
    /// Category tag (attraction, shopping, beach, ...)
    pub category: String,
    /// Position of the entry
    #[serde(rename = "location")]
    pub coordinates: Coordinates,
    /// Short description for the map popup
    pub description: String,
    /// Optional image shown next to the entry
    #[serde(default)]
    pub image_url: Option<String>,
}

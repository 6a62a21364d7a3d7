//! Geocoded location model

use serde::{Deserialize, Serialize};

/// First geocoding match for a city name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoLocation {
    /// Display name reported by the geocoder
    #[serde(default)]
    pub name: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Elevation in meters above sea level
    #[serde(default)]
    pub elevation: Option<f64>,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub fn new(name: Option<String>, latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        Self {
            name,
            latitude,
            longitude,
            elevation,
        }
    }

    /// Geocoder's name, or the city as requested when the geocoder gave none
    #[must_use]
    pub fn display_name<'a>(&'a self, requested: &'a str) -> &'a str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(requested)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

//! Data models for the weather relay
//!
//! This module contains the response shapes and their structural checks,
//! organized by concern:
//! - Location: geocoded coordinates and metadata
//! - Weather: current conditions, fixed schema and provider passthrough
//! - Forecast: per-day forecast series
//! - Response: the JSON bodies the API emits

pub mod forecast;
pub mod location;
pub mod response;
pub mod weather;

use thiserror::Error;

// Re-export all public types for convenient access
pub use forecast::DailyForecast;
pub use location::GeoLocation;
pub use response::{HealthResponse, WeatherResponse, WeatherResponseWithForecast};
pub use weather::{CurrentWeather, ProviderCurrent};

/// A value that does not fit the shape a response promises
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {reason}")]
pub struct SchemaViolation {
    pub field: &'static str,
    pub reason: String,
}

impl SchemaViolation {
    pub fn new<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject NaN and infinities, which JSON cannot carry
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), SchemaViolation> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SchemaViolation::new(field, format!("{value} is not a finite number")))
    }
}

//! Current weather models
//!
//! The provider reports current conditions with its own field names
//! (`temperature_2m`, `wind_speed_10m`, ...). [`CurrentWeather`] is the fixed
//! schema the API promises; [`ProviderCurrent`] keeps the provider's block
//! verbatim for callers that want every field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{SchemaViolation, ensure_finite};

/// Current conditions in the API's fixed schema
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Air temperature at 2 m, in Celsius
    pub temperature: f64,
    /// Wind speed at 10 m, in km/h
    pub windspeed: f64,
    /// Wind direction at 10 m, in degrees
    pub winddirection: f64,
    /// WMO weather interpretation code
    pub weathercode: i64,
    /// Observation time in the configured timezone
    pub time: String,
}

impl CurrentWeather {
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        ensure_finite("current_weather.temperature", self.temperature)?;
        ensure_finite("current_weather.windspeed", self.windspeed)?;
        ensure_finite("current_weather.winddirection", self.winddirection)?;
        if self.time.is_empty() {
            return Err(SchemaViolation::new("current_weather.time", "must not be empty"));
        }
        Ok(())
    }
}

/// Provider field names for the values [`CurrentWeather`] carries
#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    time: String,
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: f64,
    #[serde(rename = "wind_direction_10m")]
    wind_direction: f64,
    #[serde(rename = "weather_code")]
    weather_code: i64,
}

/// The provider's `current` block, untouched
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ProviderCurrent(pub Map<String, Value>);

impl ProviderCurrent {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Map the provider's field names onto the fixed schema
    pub fn to_current_weather(&self) -> Result<CurrentWeather, SchemaViolation> {
        let current: OpenMeteoCurrent =
            serde_json::from_value(Value::Object(self.0.clone()))
                .map_err(|e| SchemaViolation::new("current_weather", e.to_string()))?;

        let weather = CurrentWeather {
            temperature: current.temperature,
            windspeed: current.wind_speed,
            winddirection: current.wind_direction,
            weathercode: current.weather_code,
            time: current.time,
        };
        weather.validate()?;
        Ok(weather)
    }
}

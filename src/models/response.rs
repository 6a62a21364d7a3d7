//! JSON bodies emitted by the API

use serde::{Deserialize, Serialize};

use super::{
    CurrentWeather, DailyForecast, GeoLocation, ProviderCurrent, SchemaViolation, ensure_finite,
};

/// Body of `GET /api/weather`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherResponse {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub current_weather: CurrentWeather,
}

/// Body of `GET /api/weather-forecast`
///
/// `current_weather` is the provider's block as received, so clients also
/// see fields outside the fixed schema such as `relative_humidity_2m`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherResponseWithForecast {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    pub current_weather: ProviderCurrent,
    #[serde(default)]
    pub daily_forecast: Option<DailyForecast>,
}

/// Body of `GET /api/health`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

fn validate_place(city: &str, location: (f64, f64), elevation: Option<f64>) -> Result<(), SchemaViolation> {
    if city.is_empty() {
        return Err(SchemaViolation::new("city", "must not be empty"));
    }
    ensure_finite("latitude", location.0)?;
    ensure_finite("longitude", location.1)?;
    if let Some(elevation) = elevation {
        ensure_finite("elevation", elevation)?;
    }
    Ok(())
}

impl WeatherResponse {
    /// Compose the response from a geocoding match and mapped current weather
    #[must_use]
    pub fn new(requested_city: &str, location: &GeoLocation, current_weather: CurrentWeather) -> Self {
        Self {
            city: location.display_name(requested_city).to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            elevation: location.elevation,
            current_weather,
        }
    }

    pub fn validate(&self) -> Result<(), SchemaViolation> {
        validate_place(&self.city, (self.latitude, self.longitude), self.elevation)?;
        self.current_weather.validate()
    }
}

impl WeatherResponseWithForecast {
    #[must_use]
    pub fn new(
        requested_city: &str,
        location: &GeoLocation,
        current_weather: ProviderCurrent,
        daily_forecast: DailyForecast,
    ) -> Self {
        Self {
            city: location.display_name(requested_city).to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            elevation: location.elevation,
            current_weather,
            daily_forecast: Some(daily_forecast),
        }
    }

    /// The forecast is passed through as received; only the place is checked
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        validate_place(&self.city, (self.latitude, self.longitude), self.elevation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_weather() -> CurrentWeather {
        CurrentWeather {
            temperature: 22.5,
            windspeed: 7.9,
            winddirection: 200.0,
            weathercode: 3,
            time: "2025-10-19T09:00".to_string(),
        }
    }

    #[test]
    fn test_elevation_serializes_as_null_when_absent() {
        let location = GeoLocation::new(Some("Santos".to_string()), -23.96, -46.33, None);
        let response = WeatherResponse::new("santos", &location, sample_weather());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["city"], "Santos");
        assert!(value["elevation"].is_null());
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_elevation_serializes_as_number_when_present() {
        let location = GeoLocation::new(None, -15.78, -47.93, Some(1172.0));
        let response = WeatherResponse::new("Brasília", &location, sample_weather());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["city"], "Brasília");
        assert_eq!(value["elevation"], 1172.0);
    }

    #[test]
    fn test_non_finite_coordinates_fail_validation() {
        let location = GeoLocation::new(Some("Nowhere".to_string()), f64::NAN, 0.0, None);
        let response = WeatherResponse::new("Nowhere", &location, sample_weather());
        assert_eq!(response.validate().unwrap_err().field, "latitude");
    }

    #[test]
    fn test_forecast_response_keeps_provider_fields() {
        let location = GeoLocation::new(Some("Curitiba".to_string()), -25.43, -49.27, Some(934.0));
        let current: ProviderCurrent = serde_json::from_value(json!({
            "time": "2025-10-19T09:00",
            "temperature_2m": 16.0,
            "relative_humidity_2m": 82
        }))
        .unwrap();
        let forecast: DailyForecast = serde_json::from_value(json!({
            "time": ["2025-10-19"],
            "weathercode": [61]
        }))
        .unwrap();

        let response = WeatherResponseWithForecast::new("curitiba", &location, current, forecast);
        assert!(response.validate().is_ok());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["current_weather"]["relative_humidity_2m"], 82);
        assert_eq!(value["daily_forecast"]["weathercode"][0], 61);
    }

    #[test]
    fn test_health_body() {
        let value = serde_json::to_value(HealthResponse::ok()).unwrap();
        assert_eq!(value, json!({ "status": "ok" }));
    }
}

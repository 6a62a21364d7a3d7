//! Open-Meteo client for geocoding, current conditions and daily forecasts
//!
//! Every call performs a single GET. The outcome is tagged:
//! `Ok(Some(_))` when the expected block is present, `Ok(None)` when the
//! provider answered without it (or with a body that does not decode), and
//! `Err(WeatherRelayError::Transport)` when no usable HTTP exchange happened.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::{Result, WeatherRelayError};
use crate::config::UpstreamConfig;
use crate::models::{DailyForecast, GeoLocation, ProviderCurrent};

/// Fields requested for current conditions
pub const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code,wind_direction_10m";

/// Fields requested for the daily forecast
pub const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode,wind_speed_10m_max,wind_direction_10m_dominant";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeoLocation>>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    current: Option<ProviderCurrent>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(default)]
    daily: Option<DailyForecast>,
    #[serde(default)]
    reason: Option<String>,
}

/// Shared Open-Meteo client; clones share one connection pool
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    config: UpstreamConfig,
}

impl OpenMeteoClient {
    /// Create a new client from the upstream configuration
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weather-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(client_build_error)?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    #[must_use]
    pub fn geocoding_url(&self, name: &str) -> String {
        format!(
            "{}?name={}&count=1&language={}&format=json",
            self.config.geocoding_url,
            urlencoding::encode(name),
            urlencoding::encode(&self.config.language)
        )
    }

    #[must_use]
    pub fn current_weather_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}?latitude={}&longitude={}&current={}&timezone={}",
            self.config.forecast_url,
            lat,
            lon,
            CURRENT_FIELDS,
            urlencoding::encode(&self.config.timezone)
        )
    }

    #[must_use]
    pub fn forecast_url(&self, lat: f64, lon: f64, days: u8) -> String {
        format!(
            "{}?latitude={}&longitude={}&daily={}&forecast_days={}&timezone={}",
            self.config.forecast_url,
            lat,
            lon,
            DAILY_FIELDS,
            days,
            urlencoding::encode(&self.config.timezone)
        )
    }

    /// Resolve a city name to its first geocoding match
    #[instrument(skip(self))]
    pub async fn geocode_city(&self, name: &str) -> Result<Option<GeoLocation>> {
        info!("Geocoding city: '{}'", name);

        let Some(response) = self
            .get_json::<GeocodingResponse>(&self.geocoding_url(name))
            .await?
        else {
            return Ok(None);
        };

        let location = response.results.and_then(|results| results.into_iter().next());
        match &location {
            Some(location) => debug!(
                "Found '{}' at ({})",
                location.name.as_deref().unwrap_or(name),
                location.format_coordinates()
            ),
            None => warn!("No geocoding results for '{}'", name),
        }

        Ok(location)
    }

    /// Fetch the provider's current conditions block
    #[instrument(skip(self))]
    pub async fn fetch_current_weather(&self, lat: f64, lon: f64) -> Result<Option<ProviderCurrent>> {
        info!("Getting current weather for coordinates: {:.4}, {:.4}", lat, lon);

        let Some(response) = self
            .get_json::<CurrentResponse>(&self.current_weather_url(lat, lon))
            .await?
        else {
            return Ok(None);
        };

        if response.current.is_none() {
            warn!(
                "Upstream response has no current block: {}",
                response.reason.as_deref().unwrap_or("no reason given")
            );
        }
        Ok(response.current)
    }

    /// Fetch the provider's daily forecast block for `days` days
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, lat: f64, lon: f64, days: u8) -> Result<Option<DailyForecast>> {
        info!(
            "Getting {}-day forecast for coordinates: {:.4}, {:.4}",
            days, lat, lon
        );

        let Some(response) = self
            .get_json::<DailyResponse>(&self.forecast_url(lat, lon, days))
            .await?
        else {
            return Ok(None);
        };

        match &response.daily {
            Some(daily) => {
                debug!("Forecast covers {} days", daily.days());
                if let Some((name, len)) = daily.uneven_series() {
                    warn!(
                        "Forecast series '{}' has {} entries, expected {}",
                        name,
                        len,
                        daily.days()
                    );
                }
            }
            None => warn!(
                "Upstream response has no daily block: {}",
                response.reason.as_deref().unwrap_or("no reason given")
            ),
        }
        Ok(response.daily)
    }

    /// One GET; undecodable bodies become `None`, transport failures `Err`
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Upstream request failed: {}", e);
            e
        })?;
        let status = response.status();
        let body = response.bytes().await?;

        let elapsed = start_time.elapsed();
        debug!(
            "Upstream responded {} with {} bytes in {:.3}s",
            status,
            body.len(),
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow upstream response: {:.3}s", elapsed.as_secs_f64());
        }

        match serde_json::from_slice::<T>(&body) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                warn!("Undecodable upstream payload (HTTP {}): {}", status, e);
                Ok(None)
            }
        }
    }
}

/// A client that cannot be built is a startup problem, not an upstream one
fn client_build_error(e: reqwest::Error) -> WeatherRelayError {
    WeatherRelayError::config(format!("Failed to create HTTP client: {e}"))
}

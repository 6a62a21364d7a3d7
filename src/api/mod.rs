use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{
    Result, WeatherRelayError,
    config::MAX_FORECAST_DAYS,
    models::{GeoLocation, HealthResponse, SchemaViolation, WeatherResponse, WeatherResponseWithForecast},
    open_meteo::OpenMeteoClient,
};

const WEATHER_FETCH_FAILED: &str = "Failed to fetch weather from upstream";
const CURRENT_FETCH_FAILED: &str = "Failed to fetch current weather";
const FORECAST_FETCH_FAILED: &str = "Failed to fetch daily forecast";

/// Per-router state; the upstream client's connection pool is shared by clones
#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: OpenMeteoClient,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: OpenMeteoClient) -> Self {
        Self { upstream }
    }
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: String,
    #[serde(default)]
    pub days: Option<i64>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/weather-forecast", get(get_weather_forecast))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

#[instrument(skip(state))]
async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<WeatherResponse>> {
    let city = validate_city(&query.city)?;
    let location = resolve_city(&state.upstream, city).await?;

    let current = state
        .upstream
        .fetch_current_weather(location.latitude, location.longitude)
        .await?
        .ok_or_else(|| WeatherRelayError::upstream(WEATHER_FETCH_FAILED))?;

    let current_weather = current
        .to_current_weather()
        .map_err(|violation| schema_failure(violation, WEATHER_FETCH_FAILED))?;

    let response = WeatherResponse::new(city, &location, current_weather);
    response
        .validate()
        .map_err(|violation| schema_failure(violation, WEATHER_FETCH_FAILED))?;

    Ok(Json(response))
}

#[instrument(skip(state))]
async fn get_weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<WeatherResponseWithForecast>> {
    let city = validate_city(&query.city)?;
    let days = match query.days {
        Some(days) => validate_days(days)?,
        None => state.upstream.config().forecast_days,
    };
    let location = resolve_city(&state.upstream, city).await?;

    let current = state
        .upstream
        .fetch_current_weather(location.latitude, location.longitude)
        .await?
        .ok_or_else(|| WeatherRelayError::upstream(CURRENT_FETCH_FAILED))?;

    let forecast = state
        .upstream
        .fetch_forecast(location.latitude, location.longitude, days)
        .await?
        .ok_or_else(|| WeatherRelayError::upstream(FORECAST_FETCH_FAILED))?;

    let response = WeatherResponseWithForecast::new(city, &location, current, forecast);
    response
        .validate()
        .map_err(|violation| schema_failure(violation, FORECAST_FETCH_FAILED))?;

    Ok(Json(response))
}

async fn resolve_city(upstream: &OpenMeteoClient, city: &str) -> Result<GeoLocation> {
    upstream
        .geocode_city(city)
        .await?
        .ok_or_else(|| WeatherRelayError::not_found(city))
}

fn validate_city(city: &str) -> Result<&str> {
    if city.is_empty() {
        return Err(WeatherRelayError::validation(
            "city must be at least 1 character long",
        ));
    }
    Ok(city)
}

fn validate_days(days: i64) -> Result<u8> {
    u8::try_from(days)
        .ok()
        .filter(|days| (1..=MAX_FORECAST_DAYS).contains(days))
        .ok_or_else(|| {
            WeatherRelayError::validation(format!(
                "days must be between 1 and {MAX_FORECAST_DAYS}, got {days}"
            ))
        })
}

fn schema_failure(violation: SchemaViolation, message: &str) -> WeatherRelayError {
    warn!("Upstream data does not fit the response schema: {}", violation);
    WeatherRelayError::upstream(message)
}

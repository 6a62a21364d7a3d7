//! Weather relay - geocode a city and relay Open-Meteo weather data
//!
//! This library provides the HTTP API, the Open-Meteo client it delegates
//! to, and the response models the API promises.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod open_meteo;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::WeatherRelayConfig;
pub use error::WeatherRelayError;
pub use models::{CurrentWeather, DailyForecast, GeoLocation, WeatherResponse, WeatherResponseWithForecast};
pub use open_meteo::OpenMeteoClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherRelayError>;

//! Configuration management for the weather relay
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and validates the resulting settings.

use crate::WeatherRelayError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "WEATHER_RELAY_CONFIG";

/// Root configuration structure for the weather relay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherRelayConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream provider settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Open-Meteo endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Forecast endpoint, used for both current conditions and daily forecasts
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Language hint sent with geocoding queries
    #[serde(default = "default_language")]
    pub language: String,
    /// Timezone the provider reports timestamps in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Forecast length used when a request does not ask for one
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Open-Meteo refuses forecasts longer than this
pub const MAX_FORECAST_DAYS: u8 = 16;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_language() -> String {
    "pt".to_string()
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_forecast_days() -> u8 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            language: default_language(),
            timezone: default_timezone(),
            timeout_seconds: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherRelayConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHER_RELAY_SERVER__PORT=9000 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("WEATHER_RELAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherRelayConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.upstream.geocoding_url.is_empty() {
            self.upstream.geocoding_url = default_geocoding_url();
        }
        if self.upstream.forecast_url.is_empty() {
            self.upstream.forecast_url = default_forecast_url();
        }
        if self.upstream.language.is_empty() {
            self.upstream.language = default_language();
        }
        if self.upstream.timezone.is_empty() {
            self.upstream.timezone = default_timezone();
        }
        if self.upstream.timeout_seconds == 0 {
            self.upstream.timeout_seconds = default_timeout();
        }
        if self.upstream.forecast_days == 0 {
            self.upstream.forecast_days = default_forecast_days();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(WeatherRelayError::config("Server port must be non-zero").into());
        }

        if self.upstream.timeout_seconds > 300 {
            return Err(
                WeatherRelayError::config("Upstream timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.upstream.forecast_days > MAX_FORECAST_DAYS {
            return Err(WeatherRelayError::config(format!(
                "Default forecast length cannot exceed {MAX_FORECAST_DAYS} days"
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherRelayError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherRelayError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("geocoding_url", &self.upstream.geocoding_url),
            ("forecast_url", &self.upstream.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherRelayError::config(format!(
                    "Upstream {name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WeatherRelayConfig::default();
        assert_eq!(
            config.upstream.geocoding_url,
            "https://geocoding-api.open-meteo.com/v1/search"
        );
        assert_eq!(config.upstream.forecast_url, "https://api.open-meteo.com/v1/forecast");
        assert_eq!(config.upstream.language, "pt");
        assert_eq!(config.upstream.timezone, "America/Sao_Paulo");
        assert_eq!(config.upstream.forecast_days, 7);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherRelayConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WeatherRelayConfig::default();
        config.upstream.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = WeatherRelayConfig::default();
        config.upstream.forecast_days = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = WeatherRelayConfig::default();
        config.upstream.forecast_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("forecast_url"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = WeatherRelayConfig::default();
        config.upstream.timezone.clear();
        config.upstream.forecast_days = 0;
        config.apply_defaults();
        assert_eq!(config.upstream.timezone, "America/Sao_Paulo");
        assert_eq!(config.upstream.forecast_days, 7);
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "weather-relay-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 9100\n\n[upstream]\nforecast_days = 3").unwrap();

        let config = WeatherRelayConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.upstream.forecast_days, 3);
        assert_eq!(config.upstream.language, "pt");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let path = std::env::temp_dir().join("weather-relay-missing-config.toml");
        let config = WeatherRelayConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.upstream.timeout_seconds, 30);
    }
}

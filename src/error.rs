//! Error types and HTTP mapping for the weather relay

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the weather relay
#[derive(Error, Debug)]
pub enum WeatherRelayError {
    /// The geocoder returned no match for the requested city
    #[error("City '{city}' not found")]
    NotFound { city: String },

    /// The upstream answered but the expected data was missing or malformed
    #[error("{message}")]
    Upstream { message: String },

    /// Network-level failure talking to the upstream provider
    #[error("Upstream transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// Request parameter validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherRelayError {
    /// Create a new not-found error for a city
    pub fn not_found<S: Into<String>>(city: S) -> Self {
        Self::NotFound { city: city.into() }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error is surfaced as
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherRelayError::NotFound { .. } => StatusCode::NOT_FOUND,
            WeatherRelayError::Upstream { .. } | WeatherRelayError::Transport { .. } => {
                StatusCode::BAD_GATEWAY
            }
            WeatherRelayError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            WeatherRelayError::Config { .. } | WeatherRelayError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherRelayError::NotFound { .. }
            | WeatherRelayError::Upstream { .. }
            | WeatherRelayError::Validation { .. } => self.to_string(),
            WeatherRelayError::Transport { .. } => "Upstream service unavailable".to_string(),
            WeatherRelayError::Config { .. } | WeatherRelayError::Io { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for WeatherRelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", self);
        }
        (status, Json(json!({ "detail": self.user_message() }))).into_response()
    }
}

//! Weather client error types

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider call an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Direct geocoding by city name
    Geocoding,
    /// Current conditions by city name
    CurrentWeather,
    /// One Call daily forecast
    DailyForecast,
    /// 5 day / 3 hour forecast
    IntervalForecast,
    /// Air pollution reading
    AirQuality,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Geocoding => "Geocoding",
            Self::CurrentWeather => "Current weather",
            Self::DailyForecast => "Daily forecast",
            Self::IntervalForecast => "Forecast",
            Self::AirQuality => "Air quality",
        })
    }
}

/// Errors that can occur while talking to the weather provider
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key configured
    #[error("Missing OpenWeather API key. Set it in the configuration before fetching data.")]
    MissingCredential,

    /// Geocoding returned no match for the city
    #[error("City not found: \"{0}\". Please check the spelling.")]
    NotFound(String),

    /// Provider rejected the API key (HTTP 401)
    #[error("Invalid API key. Please verify the configured OpenWeather API key.")]
    InvalidCredentials,

    /// Provider rate limit hit (HTTP 429)
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("{operation} failed ({status}){}", message_suffix(.message))]
    ProviderError {
        /// Call that failed
        operation: Operation,
        /// HTTP status code
        status: u16,
        /// Provider-supplied message, if the body carried one
        message: Option<String>,
    },

    /// Successful response whose body did not have the expected shape
    #[error("{operation} returned an unexpected response: {reason}")]
    MalformedResponse {
        /// Call that failed
        operation: Operation,
        /// Decoder error
        reason: String,
    },

    /// Transport-level failure (DNS, refused connection, TLS)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Error body returned by OpenWeather (`{"cod": 404, "message": "..."}`)
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl WeatherError {
    /// Normalize a non-success response
    ///
    /// The body is only used to extract the provider's `message`; a body that
    /// is not JSON simply yields no message.
    #[must_use]
    pub fn from_status(operation: Operation, status: u16, body: &[u8]) -> Self {
        match status {
            401 => Self::InvalidCredentials,
            429 => Self::RateLimited,
            _ => Self::ProviderError {
                operation,
                status,
                message: serde_json::from_slice::<ProviderErrorBody>(body)
                    .ok()
                    .and_then(|b| b.message)
                    .filter(|m| !m.trim().is_empty()),
            },
        }
    }
}

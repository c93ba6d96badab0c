//! Weather entities
//!
//! Current conditions, daily forecast entries and the raw 3-hour samples the
//! daily entries are aggregated from when no daily feed is available.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used whenever the provider omits a condition description
pub const NO_CONDITION: &str = "N/A";

/// Current weather conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Condition description (e.g. "light rain")
    pub condition: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Visibility in km
    pub visibility: f64,
    /// City name as reported by the provider
    pub city: String,
    /// ISO 3166 country code
    pub country: String,
}

impl CurrentWeather {
    /// Display label used for the air quality card, e.g. `"New Delhi, IN"`
    #[must_use]
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// One day of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar day (UTC), serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Minimum temperature in Celsius
    pub min_temp: f64,
    /// Maximum temperature in Celsius
    pub max_temp: f64,
    /// Dominant condition description
    pub condition: String,
    /// Probability of precipitation (0.0-1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
}

impl ForecastDay {
    /// Precipitation probability as a whole percentage
    #[must_use]
    pub fn precipitation_percent(&self) -> Option<u8> {
        self.precipitation_probability
            .map(|p| (p.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

/// One entry of the 3-hour interval forecast feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSample {
    /// Start of the interval (UTC)
    pub timestamp: DateTime<Utc>,
    /// Point temperature in Celsius
    pub temperature: Option<f64>,
    /// Lowest temperature within the interval
    pub temperature_min: Option<f64>,
    /// Highest temperature within the interval
    pub temperature_max: Option<f64>,
    /// Condition description
    pub condition: String,
    /// Probability of precipitation (0.0-1.0)
    pub precipitation_probability: Option<f64>,
}

impl IntervalSample {
    /// UTC calendar date this sample belongs to
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Low temperature, falling back to the point temperature
    #[must_use]
    pub fn low(&self) -> Option<f64> {
        self.temperature_min.or(self.temperature)
    }

    /// High temperature, falling back to the point temperature
    #[must_use]
    pub fn high(&self) -> Option<f64> {
        self.temperature_max.or(self.temperature)
    }
}

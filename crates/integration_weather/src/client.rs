//! OpenWeather HTTP client

use std::time::Duration;

use async_trait::async_trait;
use domain::{
    CurrentWeather, ForecastDay, GeoLocation, IntervalSample, PollutantReading, ResolvedCity,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::{Operation, WeatherError};
use crate::models::{
    AirPollutionResponse, CurrentWeatherResponse, GeocodingResponse, IntervalForecastResponse,
    OneCallResponse,
};

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const ONE_CALL_PATH: &str = "/data/2.5/onecall";
const INTERVAL_FORECAST_PATH: &str = "/data/2.5/forecast";
const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";

/// Sections the One Call request leaves out; only `daily` is read
const ONE_CALL_EXCLUDE: &str = "current,minutely,hourly,alerts";

/// Weather provider operations
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Resolve a free-text city name to its best match
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, WeatherError>;

    /// Current conditions for a city name
    async fn fetch_current_weather(&self, city: &str) -> Result<CurrentWeather, WeatherError>;

    /// Up to seven daily entries from the daily forecast endpoint
    ///
    /// An empty list is a valid result (plans without One Call access).
    async fn fetch_daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ForecastDay>, WeatherError>;

    /// Raw 3-hour samples of the 5 day forecast
    async fn fetch_interval_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<IntervalSample>, WeatherError>;

    /// Latest pollutant concentrations at a location
    async fn fetch_pollutants(
        &self,
        location: &GeoLocation,
    ) -> Result<PollutantReading, WeatherError>;
}

/// OpenWeather REST client
pub struct OpenWeatherClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
    timeout_secs: u64,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if no API key is configured,
    /// `Configuration` if the configuration is invalid, or
    /// `ConnectionFailed` if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        if !config.has_api_key() {
            return Err(WeatherError::MissingCredential);
        }
        config.validate().map_err(WeatherError::Configuration)?;

        let WeatherConfig {
            api_key,
            base_url,
            timeout_secs,
        } = config;
        let api_key = api_key.ok_or(WeatherError::MissingCredential)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn coordinate_query(location: &GeoLocation) -> Vec<(&'static str, String)> {
        vec![
            ("lat", location.latitude().to_string()),
            ("lon", location.longitude().to_string()),
        ]
    }

    fn transport_error(&self, error: reqwest::Error) -> WeatherError {
        if error.is_timeout() {
            WeatherError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            // The URL carries the API key
            WeatherError::ConnectionFailed(error.without_url().to_string())
        }
    }

    /// Issue a GET request and decode the JSON body
    ///
    /// Non-success statuses are normalized via [`WeatherError::from_status`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%operation, path, "Sending OpenWeather request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let error = WeatherError::from_status(operation, status.as_u16(), &body);
            warn!(%operation, status = status.as_u16(), error = %error, "OpenWeather request failed");
            return Err(error);
        }

        serde_json::from_slice(&body).map_err(|e| WeatherError::MalformedResponse {
            operation,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, WeatherError> {
        let query = name.trim();
        if query.is_empty() {
            return Err(WeatherError::NotFound(name.to_string()));
        }

        let response: GeocodingResponse = self
            .get_json(
                Operation::Geocoding,
                GEOCODING_PATH,
                &[("q", query.to_string()), ("limit", "1".to_string())],
            )
            .await?;

        let city = response.into_city(query)?;
        debug!(city = %city.label(), location = %city.location, "Resolved city");
        Ok(city)
    }

    #[instrument(skip(self))]
    async fn fetch_current_weather(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let query = city.trim();
        if query.is_empty() {
            return Err(WeatherError::NotFound(city.to_string()));
        }

        let response: CurrentWeatherResponse = self
            .get_json(
                Operation::CurrentWeather,
                CURRENT_WEATHER_PATH,
                &[("q", query.to_string()), ("units", "metric".to_string())],
            )
            .await?;

        Ok(response.into_current_weather(query))
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn fetch_daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        let mut query = Self::coordinate_query(location);
        query.push(("exclude", ONE_CALL_EXCLUDE.to_string()));
        query.push(("units", "metric".to_string()));

        let response: OneCallResponse = self
            .get_json(Operation::DailyForecast, ONE_CALL_PATH, &query)
            .await?;

        let days = response.into_forecast();
        debug!(days = days.len(), "Fetched daily forecast");
        Ok(days)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn fetch_interval_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<IntervalSample>, WeatherError> {
        let mut query = Self::coordinate_query(location);
        query.push(("units", "metric".to_string()));

        let response: IntervalForecastResponse = self
            .get_json(Operation::IntervalForecast, INTERVAL_FORECAST_PATH, &query)
            .await?;

        let samples = response.into_samples();
        debug!(samples = samples.len(), "Fetched interval forecast");
        Ok(samples)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn fetch_pollutants(
        &self,
        location: &GeoLocation,
    ) -> Result<PollutantReading, WeatherError> {
        let response: AirPollutionResponse = self
            .get_json(
                Operation::AirQuality,
                AIR_POLLUTION_PATH,
                &Self::coordinate_query(location),
            )
            .await?;

        Ok(response.into_reading())
    }
}

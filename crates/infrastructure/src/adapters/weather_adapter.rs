//! Weather adapter - Implements WeatherPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{
    CurrentWeather, ForecastDay, GeoLocation, IntervalSample, PollutantReading, ResolvedCity,
};
use integration_weather::{OpenWeatherClient, WeatherConfig, WeatherError, WeatherGateway};
use tracing::{debug, instrument};

/// Adapter for the OpenWeather gateway
pub struct WeatherAdapter {
    gateway: Arc<dyn WeatherGateway>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("gateway", &"WeatherGateway")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter backed by an OpenWeather client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the configuration is
    /// invalid or the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config).map_err(Self::map_error)?;
        debug!(base_url = %client.base_url(), "Weather adapter initialized");
        Ok(Self::with_gateway(Arc::new(client)))
    }

    /// Create an adapter around any gateway implementation
    pub fn with_gateway(gateway: Arc<dyn WeatherGateway>) -> Self {
        Self { gateway }
    }

    /// Map integration weather error to application error
    ///
    /// The gateway's message is kept verbatim so users see the same text
    /// regardless of layer.
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::NotFound(_) => ApplicationError::NotFound(err.to_string()),
            WeatherError::InvalidCredentials => ApplicationError::NotAuthorized(err.to_string()),
            WeatherError::RateLimited => ApplicationError::RateLimited,
            WeatherError::MissingCredential => ApplicationError::Configuration(err.to_string()),
            WeatherError::Configuration(message) => ApplicationError::Configuration(message),
            WeatherError::ProviderError { .. }
            | WeatherError::MalformedResponse { .. }
            | WeatherError::ConnectionFailed(_)
            | WeatherError::Timeout { .. } => ApplicationError::ExternalService(err.to_string()),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self))]
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, ApplicationError> {
        self.gateway
            .resolve_city(name)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ApplicationError> {
        self.gateway
            .fetch_current_weather(city)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ForecastDay>, ApplicationError> {
        self.gateway
            .fetch_daily_forecast(location)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn interval_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<IntervalSample>, ApplicationError> {
        self.gateway
            .fetch_interval_forecast(location)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn pollutants(
        &self,
        location: &GeoLocation,
    ) -> Result<PollutantReading, ApplicationError> {
        self.gateway
            .fetch_pollutants(location)
            .await
            .map_err(Self::map_error)
    }
}

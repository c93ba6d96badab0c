//! Weather service port
//!
//! Defines the interface for weather and air quality data retrieval.

use async_trait::async_trait;
use domain::{
    CurrentWeather, ForecastDay, GeoLocation, IntervalSample, PollutantReading, ResolvedCity,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather provider operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Resolve a free-text city name to coordinates
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, ApplicationError>;

    /// Current conditions for a city name
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ApplicationError>;

    /// Daily forecast entries, possibly empty
    async fn daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ForecastDay>, ApplicationError>;

    /// Raw 3-hour forecast samples
    async fn interval_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<IntervalSample>, ApplicationError>;

    /// Latest pollutant concentrations
    async fn pollutants(&self, location: &GeoLocation)
    -> Result<PollutantReading, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherPort>();
    }
}

//! Dashboard service
//!
//! Loads everything the weather dashboard shows for a city: current
//! conditions, a daily forecast and the air quality index. The daily
//! forecast comes from the provider's daily endpoint when it has data and
//! is otherwise aggregated from the 3-hour interval feed.

use std::{fmt, sync::Arc};

use domain::{
    AqiResult, CurrentWeather, ForecastDay, GeoLocation, MAX_FORECAST_DAYS, ResolvedCity,
    aggregate_daily,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::WeatherPort};

/// Where a forecast's daily entries came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    /// Provider's daily forecast endpoint
    DailyEndpoint,
    /// Aggregated from the 3-hour interval forecast
    AggregatedFallback,
}

impl ForecastSource {
    /// Human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::DailyEndpoint => "daily forecast",
            Self::AggregatedFallback => "aggregated 3-hour forecast",
        }
    }
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Daily forecast together with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Which endpoint produced the days
    pub source: ForecastSource,
    /// At most seven days in ascending date order
    pub days: Vec<ForecastDay>,
}

/// Everything shown for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Geocoded city the forecast and AQI refer to
    pub city: ResolvedCity,
    /// Current conditions
    pub weather: CurrentWeather,
    /// Daily forecast
    pub forecast: Forecast,
    /// Air quality index
    pub air_quality: AqiResult,
}

/// Service that assembles dashboard data from the weather port
pub struct DashboardService {
    weather_port: Arc<dyn WeatherPort>,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Create a new dashboard service
    pub fn new(weather_port: Arc<dyn WeatherPort>) -> Self {
        Self { weather_port }
    }

    /// Geocode a city name
    #[instrument(skip(self))]
    pub async fn resolve_city(&self, city: &str) -> Result<ResolvedCity, ApplicationError> {
        self.weather_port.resolve_city(city).await
    }

    /// Forecast for a city name
    ///
    /// The city is geocoded once; the same coordinates serve both the daily
    /// endpoint and the interval fallback.
    #[instrument(skip(self))]
    pub async fn forecast_for(&self, city: &str) -> Result<Forecast, ApplicationError> {
        let resolved = self.weather_port.resolve_city(city).await?;
        self.forecast_at(&resolved.location).await
    }

    /// Forecast for already resolved coordinates
    ///
    /// A failed or empty daily response switches to the interval feed. An
    /// interval failure is returned to the caller.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn forecast_at(&self, location: &GeoLocation) -> Result<Forecast, ApplicationError> {
        match self.weather_port.daily_forecast(location).await {
            Ok(days) if !days.is_empty() => {
                debug!(days = days.len(), "Using daily forecast endpoint");
                return Ok(Forecast {
                    source: ForecastSource::DailyEndpoint,
                    days,
                });
            },
            Ok(_) => debug!("Daily forecast returned no entries, aggregating interval forecast"),
            Err(e) => warn!(error = %e, "Daily forecast unavailable, aggregating interval forecast"),
        }

        let samples = self.weather_port.interval_forecast(location).await?;
        let days = aggregate_daily(&samples, MAX_FORECAST_DAYS);
        debug!(samples = samples.len(), days = days.len(), "Aggregated interval forecast");

        Ok(Forecast {
            source: ForecastSource::AggregatedFallback,
            days,
        })
    }

    /// Air quality index at a location
    #[instrument(skip(self), fields(location = %location))]
    pub async fn air_quality(
        &self,
        location: &GeoLocation,
        label: &str,
    ) -> Result<AqiResult, ApplicationError> {
        let reading = self.weather_port.pollutants(location).await?;
        let result = AqiResult::from_reading(&reading, label);
        debug!(index = result.index, category = %result.category(), "Computed AQI");
        Ok(result)
    }

    /// Load the complete dashboard for a city
    ///
    /// Calls run one after another and the first failure aborts the load.
    #[instrument(skip(self))]
    pub async fn load(&self, city: &str) -> Result<Dashboard, ApplicationError> {
        info!("Loading dashboard");

        let weather = self.weather_port.current_weather(city).await?;
        let resolved = self.weather_port.resolve_city(city).await?;
        let forecast = self.forecast_at(&resolved.location).await?;
        let air_quality = self
            .air_quality(&resolved.location, &weather.location_label())
            .await?;

        info!(
            city = %resolved.label(),
            source = %forecast.source,
            aqi = air_quality.index,
            "Dashboard loaded"
        );

        Ok(Dashboard {
            city: resolved,
            weather,
            forecast,
            air_quality,
        })
    }
}

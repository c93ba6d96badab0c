//! OpenWeather integration
//!
//! Client for the OpenWeather REST API (<https://openweathermap.org/api>):
//! direct geocoding, current conditions, the One Call daily forecast, the
//! 5 day / 3 hour forecast and air pollution readings. Every HTTP or payload
//! failure is normalized into [`WeatherError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_weather::{OpenWeatherClient, WeatherConfig, WeatherGateway};
//!
//! let config = WeatherConfig::with_api_key("my-key");
//! let client = OpenWeatherClient::new(config)?;
//!
//! let city = client.resolve_city("New Delhi").await?;
//! let reading = client.fetch_pollutants(&city.location).await?;
//! ```

pub mod client;
mod config;
mod error;
mod models;

pub use client::{OpenWeatherClient, WeatherGateway};
pub use config::WeatherConfig;
pub use error::{Operation, WeatherError};

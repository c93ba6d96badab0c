//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application's weather port on top of the OpenWeather
//! client and provides configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, LoggingConfig, RefreshConfig, WeatherConfig};
pub use telemetry::{TelemetryError, init_logging};

//! Application configuration
//!
//! Split into focused sub-modules:
//! - `refresh`: periodic AQI refresh
//! - `logging`: log output format
//!
//! The `weather` section is the gateway's own [`WeatherConfig`].
//!
//! Sources are layered: built-in defaults, then an optional TOML/YAML/JSON
//! file, then environment variables prefixed with `WEATHER_DASHBOARD`
//! (nested keys use `__`, e.g. `WEATHER_DASHBOARD__WEATHER__API_KEY`).

mod logging;
mod refresh;

use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integration_weather::WeatherConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use refresh::RefreshConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WEATHER_DASHBOARD";

/// Config file looked up in the working directory when no path is given
const DEFAULT_CONFIG_NAME: &str = "config";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenWeather client configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// AQI refresh configuration
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// With `path` set the file must exist; otherwise `config.{toml,yaml,json}`
    /// in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_environment(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
    }

    fn load_with_environment(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = config::Config::builder()
            .set_default("refresh.interval_secs", refresh::DEFAULT_INTERVAL_SECS)?
            .add_source(file)
            .add_source(environment)
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        debug!(config = ?app_config, "Configuration loaded");
        Ok(app_config)
    }

    /// Replace the API key (e.g. from a command-line flag)
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.weather.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Validate all sections
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.weather
            .validate()
            .map_err(|e| format!("weather: {e}"))?;
        self.refresh
            .validate()
            .map_err(|e| format!("refresh: {e}"))?;
        Ok(())
    }
}

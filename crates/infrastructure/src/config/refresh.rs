//! AQI refresh configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Periodic AQI refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between AQI refreshes (default: 60)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl RefreshConfig {
    /// Refresh interval as a duration
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("interval_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_minute() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let config = RefreshConfig { interval_secs: 0 };
        assert!(config.validate().is_err());
    }
}

//! Air quality entities

use serde::{Deserialize, Serialize};

use crate::air_quality::overall_index;

/// Most recent pollutant measurement at a location
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    /// Fine particulate matter concentration in µg/m³
    pub pm2_5: Option<f64>,
    /// Coarse particulate matter concentration in µg/m³
    pub pm10: Option<f64>,
    /// Provider's own categorical index (1 = good .. 5 = very poor)
    pub legacy_index: Option<u8>,
}

/// US EPA air quality index for a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiResult {
    /// Overall index, always within 0..=500
    pub index: u16,
    /// Location label, e.g. `"New Delhi, IN"`
    pub location: String,
}

impl AqiResult {
    /// Compute the overall index for a reading
    #[must_use]
    pub fn from_reading(reading: &PollutantReading, location: impl Into<String>) -> Self {
        Self {
            index: overall_index(reading),
            location: location.into(),
        }
    }

    /// EPA category of this index
    #[must_use]
    pub const fn category(&self) -> AqiCategory {
        AqiCategory::from_index(self.index)
    }
}

/// US EPA air quality categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthyForSensitiveGroups,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301-500
    Hazardous,
}

impl AqiCategory {
    /// Classify an index value
    #[must_use]
    pub const fn from_index(index: u16) -> Self {
        match index {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Human-readable category name
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// One-line health advice for the category
    #[must_use]
    pub const fn advice(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory. Enjoy outdoor activities.",
            Self::Moderate => {
                "Acceptable air quality. Sensitive groups should limit prolonged outdoor exertion."
            },
            Self::UnhealthyForSensitiveGroups => {
                "Sensitive people may experience effects. Consider shorter or less intense outdoor activities."
            },
            Self::Unhealthy => {
                "Everyone may begin to experience health effects. Reduce strenuous outdoor activity."
            },
            Self::VeryUnhealthy => {
                "Health alert: everyone may experience more serious effects. Avoid outdoor activity if possible."
            },
            Self::Hazardous => {
                "Emergency conditions. Stay indoors, use air purification, and wear a mask if you must go outside."
            },
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

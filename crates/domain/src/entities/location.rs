//! Geocoded city

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Best geocoding match for a free-text city name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCity {
    /// Coordinates of the match
    pub location: GeoLocation,
    /// Normalized city name as reported by the provider
    pub city: String,
    /// ISO 3166 country code
    pub country: String,
}

impl ResolvedCity {
    /// Build a resolved city from raw geocoding fields
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range or the city name is blank.
    pub fn new(
        latitude: f64,
        longitude: f64,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let city = city.into();
        if city.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "geocoded city name is empty".to_string(),
            ));
        }
        Ok(Self {
            location: GeoLocation::new(latitude, longitude)?,
            city,
            country: country.into(),
        })
    }

    /// Display label, e.g. `"New Delhi, IN"`
    #[must_use]
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_includes_country() {
        let city = ResolvedCity::new(28.61, 77.21, "New Delhi", "IN").unwrap();
        assert_eq!(city.label(), "New Delhi, IN");
    }

    #[test]
    fn label_without_country() {
        let city = ResolvedCity::new(0.0, 0.0, "Null Island", "").unwrap();
        assert_eq!(city.label(), "Null Island");
    }

    #[test]
    fn rejects_invalid_coordinates() {
        let err = ResolvedCity::new(120.0, 0.0, "Nowhere", "XX").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCoordinates(_)));
    }

    #[test]
    fn rejects_blank_city() {
        let err = ResolvedCity::new(1.0, 1.0, "  ", "XX").unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}

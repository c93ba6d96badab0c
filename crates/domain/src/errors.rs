//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_is_transparent() {
        let err = DomainError::from(InvalidCoordinates);
        assert_eq!(err.to_string(), InvalidCoordinates.to_string());
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("city must not be empty".to_string());
        assert_eq!(err.to_string(), "Validation failed: city must not be empty");
    }
}

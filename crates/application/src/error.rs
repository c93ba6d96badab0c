//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Variants that originate at the weather provider carry the provider
/// layer's user-facing message unchanged.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Requested city could not be found
    #[error("{0}")]
    NotFound(String),

    /// Missing or rejected credentials
    #[error("{0}")]
    NotAuthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// External service error
    #[error("{0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Stored feedback token could not be parsed
    #[error("Invalid feedback token: {0}")]
    InvalidToken(String),

    /// Stored feedback token uses the pre-migration storage shape
    #[error("Feedback token uses the legacy storage format")]
    LegacyToken,

    /// Unknown search facet tag received from the backend
    #[error("Unknown facet kind: {0}")]
    UnknownFacet(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

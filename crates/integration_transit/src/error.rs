//! Transit error types

use thiserror::Error;

/// Errors that can occur while processing itineraries
#[derive(Debug, Error)]
pub enum TransitError {
    /// Polyline geometry could not be decoded
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

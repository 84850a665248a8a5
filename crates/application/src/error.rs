//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Input rejected before reaching any service
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Persistent client state could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_convert() {
        let err: ApplicationError = DomainError::LegacyToken.into();
        assert!(matches!(err, ApplicationError::Domain(DomainError::LegacyToken)));
        assert_eq!(
            err.to_string(),
            "Feedback token uses the legacy storage format"
        );
    }

    #[test]
    fn messages_carry_detail() {
        assert_eq!(
            ApplicationError::Storage("disk full".to_string()).to_string(),
            "Storage error: disk full"
        );
        assert_eq!(
            ApplicationError::Validation("short".to_string()).to_string(),
            "Validation failed: short"
        );
    }
}

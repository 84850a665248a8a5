//! Backend API error types

use thiserror::Error;

/// Errors that can occur while talking to the navigation backend
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The requested entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests (429)
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying (if provided by the server)
        retry_after_secs: Option<u64>,
    },

    /// The backend rejected the request payload (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The feedback token was not accepted (403)
    #[error("Feedback token rejected")]
    TokenRejected,

    /// The privacy notice was not accepted (451)
    #[error("Privacy notice not accepted")]
    PrivacyNotAccepted,

    /// Internal server error (500)
    #[error("Server error: {0}")]
    ServerError(String),

    /// Feature not configured on the server or temporarily unavailable (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other non-success status
    #[error("Unexpected status {0}")]
    UnexpectedStatus(u16),

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl NavigationError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::ServerError(_)
        )
    }

    /// Whether the request never produced an HTTP response
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout { .. })
    }

    /// Map a non-success status onto an error
    #[must_use]
    pub fn from_status(status: u16, body: &str, retry_after_secs: Option<u64>) -> Self {
        let detail = if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.trim().to_string()
        };
        match status {
            400 => Self::BadRequest(detail),
            403 => Self::TokenRejected,
            404 => Self::NotFound(detail),
            429 => Self::RateLimited { retry_after_secs },
            451 => Self::PrivacyNotAccepted,
            500 => Self::ServerError(detail),
            503 => Self::ServiceUnavailable(detail),
            other => Self::UnexpectedStatus(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            NavigationError::from_status(400, "subject too short", None),
            NavigationError::BadRequest(msg) if msg == "subject too short"
        ));
        assert!(matches!(
            NavigationError::from_status(403, "", None),
            NavigationError::TokenRejected
        ));
        assert!(matches!(
            NavigationError::from_status(429, "", Some(30)),
            NavigationError::RateLimited {
                retry_after_secs: Some(30)
            }
        ));
        assert!(matches!(
            NavigationError::from_status(451, "", None),
            NavigationError::PrivacyNotAccepted
        ));
        assert!(matches!(
            NavigationError::from_status(503, "", None),
            NavigationError::ServiceUnavailable(msg) if msg == "HTTP 503"
        ));
        assert!(matches!(
            NavigationError::from_status(418, "", None),
            NavigationError::UnexpectedStatus(418)
        ));
    }

    #[test]
    fn retryable_errors() {
        assert!(NavigationError::ConnectionFailed("refused".to_string()).is_retryable());
        assert!(NavigationError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(NavigationError::RateLimited { retry_after_secs: None }.is_retryable());
        assert!(!NavigationError::TokenRejected.is_retryable());
        assert!(!NavigationError::ServiceUnavailable("off".to_string()).is_retryable());
        assert!(!NavigationError::NotFound("x".to_string()).is_retryable());
    }

    #[test]
    fn transport_failures() {
        assert!(NavigationError::Timeout { timeout_secs: 5 }.is_transport_failure());
        assert!(!NavigationError::UnexpectedStatus(418).is_transport_failure());
    }
}

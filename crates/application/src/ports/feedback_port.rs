//! Feedback backend port

use async_trait::async_trait;
use domain::FeedbackRequest;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Why no feedback token could be obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenRequestError {
    #[error("Too many requests. Please wait a while before sending more feedback.")]
    RateLimited,

    #[error("Feedback is currently not configured on this server.")]
    NotConfigured,

    #[error("Unexpected status {0} while requesting a feedback token.")]
    UnexpectedStatus(u16),

    #[error("Requesting a feedback token failed: {0}")]
    RequestFailed(String),
}

impl TokenRequestError {
    /// Whether sending feedback stays disabled after this error
    ///
    /// Only a missing response leaves the form usable, every server answer
    /// blocks it.
    #[must_use]
    pub const fn blocks_send(&self) -> bool {
        !matches!(self, Self::RequestFailed(_))
    }
}

/// Why a feedback submission was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("The feedback was rejected as invalid: {0}")]
    InvalidInput(String),

    #[error("The feedback token was rejected. Please try again.")]
    TokenRejected,

    #[error("Please accept the privacy policy to send feedback.")]
    PrivacyNotAccepted,

    #[error("The server failed to process the feedback. Please try again later.")]
    ServerError,

    #[error("Feedback is currently not configured on this server.")]
    NotConfigured,

    #[error("Unexpected status {0} while sending feedback.")]
    UnexpectedStatus(u16),

    #[error("Sending feedback failed: {0}")]
    RequestFailed(String),
}

/// Port for the token/submission endpoints
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeedbackPort: Send + Sync {
    /// Obtain a fresh token value
    async fn request_token(&self) -> Result<String, TokenRequestError>;

    /// Submit feedback, returning the URL of the created issue
    async fn submit(&self, request: &FeedbackRequest) -> Result<String, SubmitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_failures_keep_send_enabled() {
        assert!(TokenRequestError::RateLimited.blocks_send());
        assert!(TokenRequestError::NotConfigured.blocks_send());
        assert!(TokenRequestError::UnexpectedStatus(500).blocks_send());
        assert!(!TokenRequestError::RequestFailed("offline".to_string()).blocks_send());
    }
}

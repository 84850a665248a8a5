//! Feedback adapter - Implements FeedbackPort using integration_navigation

use std::sync::Arc;

use application::ports::{FeedbackPort, SubmitError, TokenRequestError};
use async_trait::async_trait;
use domain::FeedbackRequest;
use integration_navigation::{NavigationClient, NavigationError};
use tracing::{debug, instrument, warn};

/// Adapter for the backend's feedback endpoints
pub struct FeedbackAdapter {
    client: Arc<dyn NavigationClient>,
}

impl std::fmt::Debug for FeedbackAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackAdapter")
            .field("client", &"NavigationClient")
            .finish()
    }
}

impl FeedbackAdapter {
    #[must_use]
    pub fn new(client: Arc<dyn NavigationClient>) -> Self {
        Self { client }
    }

    fn map_token_error(e: NavigationError) -> TokenRequestError {
        match e {
            NavigationError::RateLimited { .. } => TokenRequestError::RateLimited,
            NavigationError::ServiceUnavailable(_) | NavigationError::ConfigurationError(_) => {
                TokenRequestError::NotConfigured
            },
            NavigationError::UnexpectedStatus(status) => {
                TokenRequestError::UnexpectedStatus(status)
            },
            NavigationError::BadRequest(_) => TokenRequestError::UnexpectedStatus(400),
            NavigationError::TokenRejected => TokenRequestError::UnexpectedStatus(403),
            NavigationError::NotFound(_) => TokenRequestError::UnexpectedStatus(404),
            NavigationError::PrivacyNotAccepted => TokenRequestError::UnexpectedStatus(451),
            NavigationError::ServerError(_) => TokenRequestError::UnexpectedStatus(500),
            other => TokenRequestError::RequestFailed(other.to_string()),
        }
    }

    fn map_submit_error(e: NavigationError) -> SubmitError {
        match e {
            NavigationError::BadRequest(detail) => SubmitError::InvalidInput(detail),
            NavigationError::TokenRejected => SubmitError::TokenRejected,
            NavigationError::PrivacyNotAccepted => SubmitError::PrivacyNotAccepted,
            NavigationError::ServerError(_) => SubmitError::ServerError,
            NavigationError::ServiceUnavailable(_) | NavigationError::ConfigurationError(_) => {
                SubmitError::NotConfigured
            },
            NavigationError::UnexpectedStatus(status) => SubmitError::UnexpectedStatus(status),
            NavigationError::NotFound(_) => SubmitError::UnexpectedStatus(404),
            NavigationError::RateLimited { .. } => SubmitError::UnexpectedStatus(429),
            other => SubmitError::RequestFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl FeedbackPort for FeedbackAdapter {
    #[instrument(skip(self))]
    async fn request_token(&self) -> Result<String, TokenRequestError> {
        match self.client.get_feedback_token().await {
            Ok(response) => {
                debug!(created_at = response.created_at, "Obtained feedback token");
                Ok(response.token)
            },
            Err(e) => {
                warn!(error = %e, "Feedback token request failed");
                Err(Self::map_token_error(e))
            },
        }
    }

    #[instrument(skip(self, request), fields(category = %request.category))]
    async fn submit(&self, request: &FeedbackRequest) -> Result<String, SubmitError> {
        match self.client.submit_feedback(request).await {
            Ok(submitted) => Ok(submitted.issue_url),
            Err(e) => {
                warn!(error = %e, "Feedback submission failed");
                Err(Self::map_submit_error(e))
            },
        }
    }
}

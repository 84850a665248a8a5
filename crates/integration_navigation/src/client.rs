//! HTTP client for the navigation backend

use std::time::Duration;

use async_trait::async_trait;
use domain::{FeedbackRequest, SearchQuery, SearchResponse};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::NavigationConfig;
use crate::error::NavigationError;
use crate::models::{
    CalendarRequest, CalendarResponse, FeedbackSubmitted, LocationDetails, NearbyResponse,
    TokenResponse,
};

/// Upper bound on ids per calendar request, enforced by the backend as well
pub const MAX_CALENDAR_IDS: usize = 10;

/// Trait for navigation backend clients
#[async_trait]
pub trait NavigationClient: Send + Sync {
    /// Search rooms, buildings and sites
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, NavigationError>;

    /// Fetch details of a single location
    async fn location(&self, id: &str) -> Result<LocationDetails, NavigationError>;

    /// Public transport stations around a location
    async fn nearby(&self, id: &str) -> Result<NearbyResponse, NavigationError>;

    /// Request a fresh feedback token
    async fn get_feedback_token(&self) -> Result<TokenResponse, NavigationError>;

    /// Submit a feedback message
    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackSubmitted, NavigationError>;

    /// Calendar entries of up to [`MAX_CALENDAR_IDS`] locations
    async fn calendar(&self, request: &CalendarRequest)
    -> Result<CalendarResponse, NavigationError>;

    /// Check if the backend is reachable
    async fn is_healthy(&self) -> bool;
}

/// reqwest-backed [`NavigationClient`]
#[derive(Debug)]
pub struct HttpNavigationClient {
    client: Client,
    config: NavigationConfig,
}

impl HttpNavigationClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NavigationConfig) -> Result<Self, NavigationError> {
        if config.base_url.trim().is_empty() {
            return Err(NavigationError::ConfigurationError(
                "base_url must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NavigationError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Send a request, mapping transport failures
    async fn send(&self, request: RequestBuilder) -> Result<Response, NavigationError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                NavigationError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                NavigationError::ConnectionFailed(e.to_string())
            }
        })
    }

    /// Turn anything but `expected` into an error
    async fn expect_status(
        response: Response,
        expected: StatusCode,
    ) -> Result<Response, NavigationError> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Backend answered with unexpected status");
        Err(NavigationError::from_status(
            status.as_u16(),
            &body,
            retry_after_secs,
        ))
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, NavigationError> {
        let body = response
            .text()
            .await
            .map_err(|e| NavigationError::ParseError(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| NavigationError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl NavigationClient for HttpNavigationClient {
    #[instrument(skip(self), fields(q = %query.q))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, NavigationError> {
        let url = self.config.endpoint("search");
        debug!(?url, "Searching");

        let response = self
            .send(self.client.get(&url).query(&query.query_pairs()))
            .await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;
        let result: SearchResponse = Self::parse_json(response).await?;

        debug!(sections = result.sections.len(), "Search finished");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn location(&self, id: &str) -> Result<LocationDetails, NavigationError> {
        let url = self.config.endpoint(&format!("locations/{id}"));
        debug!(?url, "Fetching location details");

        let response = self.send(self.client.get(&url)).await?;
        let response = Self::expect_status(response, StatusCode::OK)
            .await
            .map_err(|e| match e {
                NavigationError::NotFound(_) => NavigationError::NotFound(id.to_string()),
                other => other,
            })?;
        Self::parse_json(response).await
    }

    #[instrument(skip(self))]
    async fn nearby(&self, id: &str) -> Result<NearbyResponse, NavigationError> {
        let url = self.config.endpoint(&format!("locations/{id}/nearby"));
        debug!(?url, "Fetching nearby stations");

        let response = self.send(self.client.get(&url)).await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;
        Self::parse_json(response).await
    }

    #[instrument(skip(self))]
    async fn get_feedback_token(&self) -> Result<TokenResponse, NavigationError> {
        let url = self.config.endpoint("feedback/get_token");
        debug!(?url, "Requesting feedback token");

        let response = self.send(self.client.post(&url)).await?;
        let response = Self::expect_status(response, StatusCode::CREATED).await?;
        Self::parse_json(response).await
    }

    #[instrument(skip(self, request), fields(category = %request.category))]
    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackSubmitted, NavigationError> {
        let url = self.config.endpoint("feedback/feedback");
        debug!(?url, "Submitting feedback");

        let response = self.send(self.client.post(&url).json(request)).await?;
        let response = Self::expect_status(response, StatusCode::CREATED).await?;
        let issue_url = response
            .text()
            .await
            .map_err(|e| NavigationError::ParseError(e.to_string()))?;

        Ok(FeedbackSubmitted {
            issue_url: issue_url.trim().to_string(),
        })
    }

    #[instrument(skip(self, request), fields(ids = request.ids.len()))]
    async fn calendar(
        &self,
        request: &CalendarRequest,
    ) -> Result<CalendarResponse, NavigationError> {
        if request.ids.is_empty() {
            return Err(NavigationError::InvalidRequest(
                "at least one id is required".to_string(),
            ));
        }
        if request.ids.len() > MAX_CALENDAR_IDS {
            return Err(NavigationError::InvalidRequest(format!(
                "at most {MAX_CALENDAR_IDS} ids per request, got {}",
                request.ids.len()
            )));
        }

        let url = self.config.endpoint("calendar");
        debug!(?url, "Fetching calendar");

        let response = self.send(self.client.post(&url).json(request)).await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;
        Self::parse_json(response).await
    }

    async fn is_healthy(&self) -> bool {
        let url = self.config.endpoint("status");
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Backend health check failed");
                false
            },
        }
    }
}

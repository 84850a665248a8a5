//! reqwest-backed [`HttpTransportPort`]

use std::time::Duration;

use application::{ApplicationError, HttpReply, HttpTransportPort};
use async_trait::async_trait;
use integration_navigation::NavigationConfig;
use reqwest::Client;
use tracing::{debug, instrument};

/// Plain GET transport used by the fetch cache
///
/// Every HTTP status counts as a reply; only missing responses are errors.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestTransport {
    /// Build a transport with the API timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NavigationConfig) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApplicationError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl HttpTransportPort for ReqwestTransport {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<HttpReply, ApplicationError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApplicationError::ExternalService(format!(
                    "request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                ApplicationError::ExternalService(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("reading body: {e}")))?;
        debug!(status, bytes = body.len(), "Received reply");

        Ok(HttpReply::new(status, body.to_vec()))
    }
}

//! Raw HTTP transport port
//!
//! The fetch cache only needs "GET this URL and give me status and bytes".

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A response as seen by the transport, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for issuing GET requests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpTransportPort: Send + Sync {
    /// Issue a GET request
    ///
    /// Any HTTP status is a successful reply; only the absence of a response
    /// (connection refused, timeout, offline) is an error.
    async fn get(&self, url: &str) -> Result<HttpReply, ApplicationError>;
}

//! De-duplicating fetch port

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::error::ApplicationError;
use crate::ports::HttpReply;

/// Parsed JSON payload shared between all callers of one URL
pub type Payload = Arc<serde_json::Value>;

/// Why a fetch produced no payload
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("The requested resource could not be found.")]
    NotFound,

    #[error("The server encountered an internal error. Please try again later.")]
    ServerError,

    #[error("The service is temporarily unavailable. Please try again later.")]
    ServiceUnavailable,

    #[error("Unexpected response status {0}.")]
    UnexpectedStatus(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("The server sent malformed content: {0}")]
    MalformedContent(String),
}

impl FetchError {
    /// Classify a non-success status
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            500 => Self::ServerError,
            503 => Self::ServiceUnavailable,
            other => Self::UnexpectedStatus(other),
        }
    }

    /// Interpret a transport result as a JSON payload
    ///
    /// # Errors
    ///
    /// Returns the matching classification for transport failures,
    /// non-success statuses and bodies that are not JSON.
    pub fn interpret(
        result: Result<HttpReply, ApplicationError>,
    ) -> Result<serde_json::Value, Self> {
        let reply = result.map_err(|e| Self::Network(e.to_string()))?;
        if !reply.is_success() {
            return Err(Self::from_status(reply.status));
        }
        serde_json::from_slice(&reply.body).map_err(|e| Self::MalformedContent(e.to_string()))
    }
}

/// Port for cached, coalesced JSON fetches
///
/// Implementations never surface errors to callers: a failed fetch resolves
/// to `None` and the reason is reported through the shared error slot.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FetchPort: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<Payload>;
}

//! Feedback token entity
//!
//! A short-lived anti-abuse credential that must accompany every feedback
//! submission. The client keeps it in persistent storage together with its
//! creation time and treats it as valid for a shorter window than the server.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Storage key under which the token is persisted
pub const FEEDBACK_TOKEN_STORAGE_KEY: &str = "feedback-token";

/// Client-side validity window (the server accepts tokens for longer)
pub const DEFAULT_TOKEN_VALIDITY: Duration = Duration::from_secs(6 * 60 * 60);

/// Minimum token age the server requires before a submission is accepted
pub const DEFAULT_MIN_MATURATION_DELAY: Duration = Duration::from_secs(10);

/// A feedback token and the moment it was issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackToken {
    token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl FeedbackToken {
    /// Create a token issued at `created_at`
    pub fn new(token: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            created_at,
        }
    }

    /// Opaque token value
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Age of the token at `now`; zero if the clock reads earlier than issuance
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).to_std().unwrap_or_default()
    }

    /// Whether the token has outlived `validity`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, validity: Duration) -> bool {
        self.age(now) > validity
    }

    /// Time left until the token is old enough to be submitted
    ///
    /// Returns `Duration::ZERO` once `min_delay` has elapsed.
    #[must_use]
    pub fn remaining_maturation(&self, now: DateTime<Utc>, min_delay: Duration) -> Duration {
        min_delay.saturating_sub(self.age(now))
    }

    /// Parse a value previously written by [`Self::to_storage`]
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LegacyToken` for the pre-migration shape
    /// (an object carrying an `expiry` field) and `DomainError::InvalidToken`
    /// for anything else that is not a stored token.
    pub fn from_storage(raw: &str) -> Result<Self, DomainError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| DomainError::InvalidToken(e.to_string()))?;

        if value.get("expiry").is_some() {
            return Err(DomainError::LegacyToken);
        }

        let token: Self =
            serde_json::from_value(value).map_err(|e| DomainError::InvalidToken(e.to_string()))?;
        if token.token.is_empty() {
            return Err(DomainError::InvalidToken("empty token".to_string()));
        }
        Ok(token)
    }

    /// Serialize for persistent storage
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidToken` if serialization fails.
    pub fn to_storage(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| DomainError::InvalidToken(e.to_string()))
    }
}

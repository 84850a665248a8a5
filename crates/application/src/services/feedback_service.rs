//! Feedback token lifecycle and submission
//!
//! A token is requested lazily, stored with its local issuance time and
//! reused until it is older than the validity window. The backend refuses
//! tokens younger than a minimum age, so a submission made right after
//! requesting one is deferred until the token has matured.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{
    DEFAULT_MIN_MATURATION_DELAY, DEFAULT_TOKEN_VALIDITY, DomainError, FEEDBACK_TOKEN_STORAGE_KEY,
    FeedbackToken,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{FeedbackPort, KeyValueStorePort, SubmitError, TokenRequestError};
use crate::services::feedback_form::FeedbackForm;
use crate::services::ui_state::ErrorSlot;

/// Token timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// How long a stored token is reused (seconds)
    #[serde(default = "default_token_validity_secs")]
    pub token_validity_secs: u64,

    /// Minimum token age before the backend accepts it (seconds)
    #[serde(default = "default_min_maturation_secs")]
    pub min_maturation_secs: u64,
}

const fn default_token_validity_secs() -> u64 {
    DEFAULT_TOKEN_VALIDITY.as_secs()
}

const fn default_min_maturation_secs() -> u64 {
    DEFAULT_MIN_MATURATION_DELAY.as_secs()
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            token_validity_secs: default_token_validity_secs(),
            min_maturation_secs: default_min_maturation_secs(),
        }
    }
}

impl FeedbackConfig {
    #[must_use]
    pub const fn token_validity(&self) -> Duration {
        Duration::from_secs(self.token_validity_secs)
    }

    #[must_use]
    pub const fn min_maturation(&self) -> Duration {
        Duration::from_secs(self.min_maturation_secs)
    }
}

/// Where the token lifecycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    Pending,
    Valid,
}

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// A previous token request was answered in a way that disables sending
    #[error("Sending feedback is currently disabled")]
    SendBlocked,

    #[error(transparent)]
    Invalid(ApplicationError),

    #[error(transparent)]
    Token(#[from] TokenRequestError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Storage(ApplicationError),
}

/// Coordinates token storage, token requests and submissions
pub struct FeedbackService {
    port: Arc<dyn FeedbackPort>,
    store: Arc<dyn KeyValueStorePort>,
    errors: Arc<ErrorSlot>,
    config: FeedbackConfig,
    pending: AtomicBool,
    block_send: AtomicBool,
}

impl std::fmt::Debug for FeedbackService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackService")
            .field("config", &self.config)
            .field("pending", &self.pending.load(Ordering::Relaxed))
            .field("block_send", &self.block_send.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl FeedbackService {
    pub fn new(
        port: Arc<dyn FeedbackPort>,
        store: Arc<dyn KeyValueStorePort>,
        errors: Arc<ErrorSlot>,
        config: FeedbackConfig,
    ) -> Self {
        Self {
            port,
            store,
            errors,
            config,
            pending: AtomicBool::new(false),
            block_send: AtomicBool::new(false),
        }
    }

    /// Whether the send button is disabled
    #[must_use]
    pub fn is_send_blocked(&self) -> bool {
        self.block_send.load(Ordering::SeqCst)
    }

    /// Re-enable sending, e.g. when the dialog is reopened
    pub fn unblock_send(&self) {
        self.block_send.store(false, Ordering::SeqCst);
    }

    /// Read the stored token, discarding legacy or unreadable values
    ///
    /// Expired tokens are returned as-is; callers decide what stale means.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn stored_token(&self) -> Result<Option<FeedbackToken>, ApplicationError> {
        let Some(raw) = self.store.get(FEEDBACK_TOKEN_STORAGE_KEY)? else {
            return Ok(None);
        };

        match FeedbackToken::from_storage(&raw) {
            Ok(token) => Ok(Some(token)),
            Err(DomainError::LegacyToken) => {
                info!("Discarding feedback token in legacy format");
                self.store.remove(FEEDBACK_TOKEN_STORAGE_KEY)?;
                Ok(None)
            },
            Err(e) => {
                warn!(error = %e, "Discarding unreadable feedback token");
                self.store.remove(FEEDBACK_TOKEN_STORAGE_KEY)?;
                Ok(None)
            },
        }
    }

    /// Drop the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn invalidate(&self) -> Result<(), ApplicationError> {
        self.store.remove(FEEDBACK_TOKEN_STORAGE_KEY)
    }

    /// Lifecycle state at `now`
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn state_at(&self, now: DateTime<Utc>) -> Result<TokenState, ApplicationError> {
        if self.pending.load(Ordering::SeqCst) {
            return Ok(TokenState::Pending);
        }
        Ok(match self.stored_token()? {
            Some(token) if !token.is_expired(now, self.config.token_validity()) => {
                TokenState::Valid
            },
            _ => TokenState::NoToken,
        })
    }

    /// Return a usable token, requesting a new one when needed
    ///
    /// # Errors
    ///
    /// Returns the token request failure; its message is also written to
    /// the error slot.
    pub async fn ensure_token(&self) -> Result<FeedbackToken, FeedbackError> {
        self.ensure_token_at(Utc::now()).await
    }

    /// [`Self::ensure_token`] with an explicit clock reading
    #[instrument(skip(self))]
    pub async fn ensure_token_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<FeedbackToken, FeedbackError> {
        let stored = self.stored_token().map_err(FeedbackError::Storage)?;
        if let Some(token) = stored.filter(|t| !t.is_expired(now, self.config.token_validity())) {
            debug!("Reusing stored feedback token");
            return Ok(token);
        }

        self.pending.store(true, Ordering::SeqCst);
        let result = self.port.request_token().await;
        self.pending.store(false, Ordering::SeqCst);

        match result {
            Ok(value) => {
                let token = FeedbackToken::new(value, now);
                let raw = token
                    .to_storage()
                    .map_err(|e| FeedbackError::Storage(e.into()))?;
                self.store
                    .set(FEEDBACK_TOKEN_STORAGE_KEY, &raw)
                    .map_err(FeedbackError::Storage)?;
                self.errors.clear();
                self.unblock_send();
                debug!("Stored new feedback token");
                Ok(token)
            },
            Err(e) => {
                warn!(error = %e, "Feedback token request failed");
                self.errors.set(e.to_string());
                if e.blocks_send() {
                    self.block_send.store(true, Ordering::SeqCst);
                }
                Err(e.into())
            },
        }
    }

    /// How long a submission at `now` has to wait for `token` to mature
    #[must_use]
    pub fn submission_delay(&self, token: &FeedbackToken, now: DateTime<Utc>) -> Duration {
        token.remaining_maturation(now, self.config.min_maturation())
    }

    /// Validate and submit feedback, returning the created issue URL
    ///
    /// # Errors
    ///
    /// See [`FeedbackError`]; every error except `Invalid` is also written
    /// to the error slot.
    pub async fn submit(&self, form: &FeedbackForm) -> Result<String, FeedbackError> {
        self.submit_at(form, Utc::now()).await
    }

    /// [`Self::submit`] with an explicit clock reading
    #[instrument(skip(self, form), fields(category = %form.category))]
    pub async fn submit_at(
        &self,
        form: &FeedbackForm,
        now: DateTime<Utc>,
    ) -> Result<String, FeedbackError> {
        if self.is_send_blocked() {
            return Err(FeedbackError::SendBlocked);
        }
        form.check().map_err(FeedbackError::Invalid)?;

        let token = self.ensure_token_at(now).await?;
        let delay = self.submission_delay(&token, now);
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis(), "Deferring submission until token matures");
            tokio::time::sleep(delay).await;
        }

        match self.port.submit(&form.to_request(token.token())).await {
            Ok(issue_url) => {
                self.invalidate().map_err(FeedbackError::Storage)?;
                self.errors.clear();
                info!(%issue_url, "Feedback submitted");
                Ok(issue_url)
            },
            Err(e) => {
                warn!(error = %e, "Feedback submission failed");
                if e == SubmitError::TokenRejected {
                    self.invalidate().map_err(FeedbackError::Storage)?;
                }
                self.errors.set(e.to_string());
                Err(e.into())
            },
        }
    }
}

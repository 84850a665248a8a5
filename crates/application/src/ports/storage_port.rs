//! Persistent key-value storage port
//!
//! Mirrors the browser's local storage: string keys, string values, last
//! writer wins.

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Well-known storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Theme,
    Language,
    FeedbackToken,
    LastOutdatedBrowserWarning,
}

impl StorageKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Language => "lang",
            Self::FeedbackToken => domain::FEEDBACK_TOKEN_STORAGE_KEY,
            Self::LastOutdatedBrowserWarning => "lastOutdatedBrowserWarning",
        }
    }
}

/// Port for persistent client state
#[cfg_attr(test, automock)]
pub trait KeyValueStorePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ApplicationError>;

    fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError>;

    /// Remove a key; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), ApplicationError>;
}

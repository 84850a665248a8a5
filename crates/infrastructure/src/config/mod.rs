//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `wayfinder.toml`, then `WAYFINDER_*` environment variables using `__` as
//! the section separator (e.g. `WAYFINDER_CDN__PORT=8080`).

mod cdn;
mod storage;

use std::path::Path;

use application::FeedbackConfig;
use integration_navigation::NavigationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cdn::CdnConfig;
pub use storage::StorageConfig;

use crate::cache::FetchCacheConfig;

/// Default config file name, looked up relative to the working directory
pub const CONFIG_FILE: &str = "wayfinder";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WAYFINDER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API
    #[serde(default)]
    pub api: NavigationConfig,

    /// Fetch cache sizing
    #[serde(default)]
    pub cache: FetchCacheConfig,

    /// Feedback token timings
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Persistent client state
    #[serde(default)]
    pub storage: StorageConfig,

    /// CDN server
    #[serde(default)]
    pub cdn: CdnConfig,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

impl AppConfig {
    /// Load from `wayfinder.toml` (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load using an explicit config file instead of the default lookup
    ///
    /// An explicitly named file must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE).required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cdn.allowed_origins"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Invalid("cache.max_entries must be positive".into()));
        }
        if self.feedback.min_maturation_secs >= self.feedback.token_validity_secs {
            return Err(ConfigError::Invalid(
                "feedback.min_maturation_secs must be below feedback.token_validity_secs".into(),
            ));
        }
        if self.cdn.root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("cdn.root must not be empty".into()));
        }
        Ok(())
    }

    /// Configuration pointing at a local backend, for tests
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            api: NavigationConfig {
                base_url: base_url.into(),
                timeout_secs: 2,
                ..NavigationConfig::default()
            },
            log_filter: "debug".to_string(),
            ..Self::default()
        }
    }
}

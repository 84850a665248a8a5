//! Application state shared across handlers

use std::{path::PathBuf, sync::Arc};

use infrastructure::CdnConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory served under `/cdn`
    pub root: Arc<PathBuf>,
    /// `max-age` sent with every file
    pub max_age_secs: u64,
}

impl AppState {
    #[must_use]
    pub fn new(config: &CdnConfig) -> Self {
        Self {
            root: Arc::new(config.root.clone()),
            max_age_secs: config.max_age_secs,
        }
    }

    /// Value of the `Cache-Control` header
    #[must_use]
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.max_age_secs)
    }
}

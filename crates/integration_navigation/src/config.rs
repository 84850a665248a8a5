//! Backend API configuration

use serde::{Deserialize, Serialize};

/// Configuration for the navigation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Base URL of the API host (without the `/api` suffix)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://nav.tum.de".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("Wayfinder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl NavigationConfig {
    /// Endpoint URL for an `/api/...` path
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = NavigationConfig::default();
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("Wayfinder/"));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = NavigationConfig {
            base_url: "http://localhost:3003/".to_string(),
            ..NavigationConfig::default()
        };
        assert_eq!(
            config.endpoint("feedback/get_token"),
            "http://localhost:3003/api/feedback/get_token"
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: NavigationConfig = serde_json::from_str(r#"{"timeout_secs": 3}"#).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.base_url, "https://nav.tum.de");
    }
}

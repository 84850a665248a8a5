//! CDN server configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Static file server for `/cdn/*`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Directory served under `/cdn`
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// `max-age` of the `Cache-Control` header in seconds
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,

    /// Allowed CORS origins (empty = any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

fn default_root() -> PathBuf {
    PathBuf::from("./cdn")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3004
}

const fn default_max_age() -> u64 {
    60 * 60 // 1 hour
}

const fn default_shutdown_timeout() -> u64 {
    30
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            host: default_host(),
            port: default_port(),
            max_age_secs: default_max_age(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the coalescing
//! fetch cache, the reqwest transport, key-value storage, the feedback
//! backend adapter and the module registry. Also owns configuration loading
//! and tracing setup for the binaries.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod http;
pub mod loader;
pub mod persistence;
pub mod telemetry;

pub use adapters::FeedbackAdapter;
pub use cache::{CacheStats, FetchCache, FetchCacheConfig};
pub use config::{AppConfig, CdnConfig, ConfigError, LogFormat, StorageConfig};
pub use http::ReqwestTransport;
pub use loader::{LoadError, ModuleRegistry};
pub use persistence::{InMemoryStore, JsonFileStore, StorageError};
pub use telemetry::{TelemetryError, init_tracing};

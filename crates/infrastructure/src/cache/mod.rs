//! Cache implementations
//!
//! - `FetchCache`: coalescing JSON fetch cache backed by moka

mod fetch_cache;

pub use fetch_cache::{CacheStats, FetchCache, FetchCacheConfig};

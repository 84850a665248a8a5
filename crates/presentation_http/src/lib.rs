//! Wayfinder CDN presentation layer
//!
//! Serves precomputed static data (API dumps, map tiles, images) under
//! `/cdn/*` with validators for conditional requests.

pub mod conditional;
pub mod content_type;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{build_app, create_router};
pub use state::AppState;

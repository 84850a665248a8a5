//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use infrastructure::CdnConfig;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{error::ApiError, handlers, state::AppState};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/cdn/{*path}", get(handlers::cdn::serve_file))
        .fallback(|| async { ApiError::NotFound("route".to_string()) })
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers(Any);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            },
        })
        .collect();
    layer.allow_origin(origins)
}

/// Router plus the middleware stack used in production
pub fn build_app(config: &CdnConfig) -> Router {
    // ServiceBuilder order: first listed = outermost
    create_router(AppState::new(config)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.allowed_origins))
            .layer(CompressionLayer::new()),
    )
}

//! Wayfinder CDN server
//!
//! Serves the static data directory under `/cdn`.

use std::time::Duration;

use infrastructure::{AppConfig, init_tracing};
use presentation_http::build_app;
use tokio::{net::TcpListener, signal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.log_format, &config.log_filter)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        root = %config.cdn.root.display(),
        max_age_secs = config.cdn.max_age_secs,
        "Wayfinder CDN starting"
    );
    if !config.cdn.root.is_dir() {
        tracing::warn!(root = %config.cdn.root.display(), "CDN root is not a directory, every file will 404");
    }

    let app = build_app(&config.cdn);

    let addr = format!("{}:{}", config.cdn.host, config.cdn.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");

    let shutdown_timeout = Duration::from_secs(config.cdn.shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    info!(?timeout, "Waiting for connections to close");
}

//! # reaktor-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the issue service.
//! Binds to configurable port (default 8080).

use reaktor_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing. LOG_FORMAT=json switches to JSON lines.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");

    // Initialize database pool (optional; absent means in-memory only).
    let db_pool = reaktor_api::db::init_pool(config.database_url.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::with_config(config, db_pool);
    let app = reaktor_api::app(state);

    tracing::info!("Reaktor issues API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

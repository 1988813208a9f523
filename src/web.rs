//! Router assembly and server loop

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::ClimacastConfig;
use crate::api::{self, AppState};
use crate::openweather::OpenWeatherClient;

/// Build the application router from configuration
pub fn app(config: &ClimacastConfig) -> Result<Router> {
    let client = match &config.weather.api_key {
        Some(key) => Some(OpenWeatherClient::new(
            key.clone(),
            config.weather.base_url.clone(),
            Duration::from_secs(u64::from(config.weather.timeout_seconds)),
        )?),
        None => {
            tracing::warn!("no API key configured, predictions will use the fallback pattern");
            None
        }
    };

    let state = Arc::new(AppState { client });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", api::router(state))
        .layer(cors))
}

/// Serve the API on the configured port until shutdown
pub async fn run(config: &ClimacastConfig) -> Result<()> {
    let router = app(config)?;

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}

//! rewards-radar server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use rewards_radar::api;
use rewards_radar::app_state::AppState;
use rewards_radar::config::RadarConfig;
use rewards_radar::domain::SnapshotStore;
use rewards_radar::service::RadarService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RadarConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        novelty_threshold = config.analysis.novelty_threshold,
        swing_threshold_pct = config.analysis.swing_threshold_pct,
        "starting rewards-radar"
    );

    // Build service layer
    let radar_service = Arc::new(RadarService::new(SnapshotStore::new(), config.analysis));

    // Build application state
    let app_state = AppState {
        radar_service,
        ranking_default_limit: config.ranking_default_limit,
    };

    // Build router
    let app = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    let app = app
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

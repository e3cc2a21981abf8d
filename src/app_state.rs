//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::RadarService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Radar service for ingestion and analysis.
    pub radar_service: Arc<RadarService>,
    /// Ranking size used when a request gives no limit.
    pub ranking_default_limit: usize,
}

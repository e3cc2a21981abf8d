//! REST endpoint handlers organized by resource.

pub mod changes;
pub mod observations;
pub mod reports;
pub mod states;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(observations::routes())
        .merge(states::routes())
        .merge(changes::routes())
        .merge(reports::routes())
}

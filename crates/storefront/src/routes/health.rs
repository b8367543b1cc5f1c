//! Health check handlers.

use axum::{extract::State, http::StatusCode};
use moodshop_core::CatalogStatus;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog has loaded, and for the
/// rest of the run if the load failed.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.shop().map(|shop| shop.status().clone()) {
        Ok(CatalogStatus::Ready) => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

//! HTTP route handlers for health and catalogs.

use axum::{extract::State, Json};

use crate::error::AppError;
use crate::lyrics::{Beat, RhymeScheme, Style, BEATS, STYLES};
use crate::types::{HealthResponse, HealthStatus, RhymeSchemeInfo};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check endpoint
///
/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let inference_configured = state.generator.has_backend();

    // Degraded if no inference backend: every response will come from local fallbacks
    let status = if inference_configured {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status,
        version: VERSION.to_string(),
        timestamp: chrono::Utc::now(),
        uptime_seconds: state.uptime_seconds(),
        inference_configured,
    })
}

/// GET /api/styles
pub async fn styles() -> Json<&'static [Style]> {
    Json(STYLES)
}

/// GET /api/beats
pub async fn beats() -> Json<&'static [Beat]> {
    Json(BEATS)
}

/// GET /api/rhyme-schemes
pub async fn rhyme_schemes() -> Json<Vec<RhymeSchemeInfo>> {
    let schemes = RhymeScheme::ALL
        .iter()
        .map(|s| RhymeSchemeInfo {
            id: s.id().to_string(),
            pattern: s.pattern().iter().map(char::to_string).collect(),
            description: format!("{} rhyme pattern ({})", s.id(), s.description()),
        })
        .collect();

    Json(schemes)
}

/// Catch-all for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

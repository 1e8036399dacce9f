//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};
use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health - Full health check.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = &state.service;
    let report = service.health().report();

    Json(HealthResponse {
        status: format!("{:?}", report.status).to_lowercase(),
        persistence_configured: service.persistence_configured(),
        persistence_healthy: service.persistence_configured()
            && service.health().persistence.is_healthy(),
        stored_submissions: service.store().len(),
    })
}

/// GET /health/ready - Readiness probe (can accept traffic).
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if state.service.health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe (service is running).
pub async fn live_handler(State(state): State<AppState>) -> StatusCode {
    if state.service.health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

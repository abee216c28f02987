use crate::controllayer::health::{HealthResponse, health_report, readiness_report};
use crate::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use tracing::{debug, instrument};

/// GET /api/health
#[instrument(skip_all)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!(service = state.service.name(), "Health check request received");
    Json(health_report(state.service))
}

/// GET /api/health/ready
#[instrument(skip_all)]
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let (status, report) = readiness_report(state.store.as_ref()).await;
    (status, Json(report))
}

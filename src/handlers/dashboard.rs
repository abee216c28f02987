use crate::controllayer::dashboard::{DashboardSummary, summarize};
use crate::datalayer::db_ops::constants::DASHBOARD_COLLECTIONS;
use crate::errors::ServiceResult;
use crate::state::AppState;
use axum::{Json, extract::State};
use tracing::instrument;

/// GET /api/dashboard
#[instrument(skip_all)]
pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> ServiceResult<Json<DashboardSummary>> {
    let summary = summarize(state.store.as_ref(), &DASHBOARD_COLLECTIONS).await?;
    Ok(Json(summary))
}

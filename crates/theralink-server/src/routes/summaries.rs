use axum::Json;
use axum::extract::{Path, State};

use theralink_core::models::patient::normalize_patient_id;
use theralink_core::models::summary::SummaryOutcome;
use theralink_dashboard::error::DashboardError;

use crate::error::ApiError;
use crate::state::AppState;

/// Session prep summary for the patient's latest score.
///
/// Generation failures come back as a `200` with an `unavailable` or
/// `stale` outcome rather than an error status.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SummaryOutcome>, ApiError> {
    let id = normalize_patient_id(&id)?;
    let record = state.store.get(&id).await?;
    let score = record
        .latest_score()
        .ok_or_else(|| DashboardError::MissingHistory {
            patient_id: id.clone(),
        })?;

    Ok(Json(state.summaries.summary_for(&id, score).await))
}

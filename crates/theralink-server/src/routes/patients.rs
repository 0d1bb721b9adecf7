use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Deserialize;

use theralink_core::models::overview::PatientOverview;
use theralink_core::models::patient::{PatientRecord, normalize_patient_id};
use theralink_dashboard::view::{PatientDashboard, patient_dashboard};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VerifiedUpdate {
    pub verified: bool,
}

#[derive(Deserialize)]
pub struct NotesUpdate {
    pub notes: String,
}

pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientOverview>>, ApiError> {
    Ok(Json(state.store.list_patients().await?))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    let id = normalize_patient_id(&id)?;
    Ok(Json(state.store.get(&id).await?))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientDashboard>, ApiError> {
    let id = normalize_patient_id(&id)?;
    let record = state.store.get(&id).await?;
    Ok(Json(patient_dashboard(&id, &record)?))
}

pub async fn set_verified(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VerifiedUpdate>, JsonRejection>,
) -> Result<Json<PatientRecord>, ApiError> {
    let Json(update) = payload?;
    let id = normalize_patient_id(&id)?;
    Ok(Json(state.store.set_verified(&id, update.verified).await?))
}

pub async fn set_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NotesUpdate>, JsonRejection>,
) -> Result<Json<PatientRecord>, ApiError> {
    let Json(update) = payload?;
    let id = normalize_patient_id(&id)?;
    Ok(Json(state.store.set_notes(&id, update.notes).await?))
}

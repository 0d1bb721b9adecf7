use axum::Form;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use theralink_core::models::patient::normalize_patient_id;
use theralink_dashboard::render::SelectedPatient;
use theralink_dashboard::view::{
    CheckInForm, FormQuestion, SubmittedCheckIn, overview, patient_dashboard, summary_panel,
};
use theralink_instruments::Instrument;
use theralink_instruments::instruments::daily_wellness::DailyWellness;
use theralink_instruments::require_instrument;

use crate::error::ApiError;
use crate::intake::{IntakeError, responses_from_form, submit_check_in};
use crate::state::AppState;

const DEMO_PATIENT_ID: &str = "patient_001";

#[derive(Deserialize)]
pub struct CheckInQuery {
    pub patient_id: Option<String>,
}

#[derive(Deserialize)]
pub struct VerifiedForm {
    pub verified: bool,
}

#[derive(Deserialize)]
pub struct NotesForm {
    pub notes: String,
}

fn form_questions(instrument: &dyn Instrument, fields: &[(String, String)]) -> Vec<FormQuestion> {
    instrument
        .questions()
        .iter()
        .map(|q| {
            // Keep what the patient picked when the form is shown again.
            let value = fields
                .iter()
                .find(|(name, _)| name == &q.id)
                .and_then(|(_, v)| v.trim().parse::<u8>().ok())
                .filter(|v| q.range.contains(f64::from(*v)))
                .unwrap_or(q.default_value);
            FormQuestion {
                id: q.id.clone(),
                text: q.text.clone(),
                min: q.range.min as u8,
                max: q.range.max as u8,
                value,
            }
        })
        .collect()
}

pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.renderer.home_page()?))
}

pub async fn check_in_form(
    State(state): State<AppState>,
    Query(query): Query<CheckInQuery>,
) -> Result<Html<String>, ApiError> {
    let instrument = require_instrument(DailyWellness::ID)?;
    let form = CheckInForm {
        patient_id: query
            .patient_id
            .unwrap_or_else(|| DEMO_PATIENT_ID.to_string()),
        questions: form_questions(instrument.as_ref(), &[]),
        errors: Vec::new(),
        submitted: None,
    };
    Ok(Html(state.renderer.check_in_page(&form)?))
}

pub async fn submit_check_in_form(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let instrument = require_instrument(DailyWellness::ID)?;
    let patient_id = fields
        .iter()
        .find(|(name, _)| name == "patient_id")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();

    // Report every problem with the submission at once.
    let mut messages = Vec::new();
    if let Err(e) = normalize_patient_id(&patient_id) {
        messages.extend(IntakeError::from(e).user_messages());
    }
    let responses = match responses_from_form(instrument.as_ref(), &fields) {
        Ok(responses) => {
            messages.extend(
                instrument
                    .validate_responses(&responses)
                    .into_iter()
                    .map(|e| e.message),
            );
            responses
        }
        Err(e) => {
            messages.extend(IntakeError::from(e).user_messages());
            Vec::new()
        }
    };

    let mut form = CheckInForm {
        patient_id: patient_id.clone(),
        questions: form_questions(instrument.as_ref(), &fields),
        errors: Vec::new(),
        submitted: None,
    };

    let mut status = StatusCode::BAD_REQUEST;
    if messages.is_empty() {
        match submit_check_in(
            state.store.as_ref(),
            instrument.as_ref(),
            &patient_id,
            responses,
            jiff::Zoned::now().date(),
            jiff::Timestamp::now(),
        )
        .await
        {
            Ok(check_in) => {
                form.patient_id = patient_id.trim().to_string();
                form.submitted = Some(SubmittedCheckIn::new(
                    &form.patient_id,
                    check_in.date,
                    check_in.score,
                ));
                status = StatusCode::OK;
            }
            Err(e) => {
                messages = e.user_messages();
                if messages.is_empty() {
                    return Err(e.into());
                }
            }
        }
    }
    form.errors = messages;

    let html = state.renderer.check_in_page(&form)?;
    Ok((status, Html(html)).into_response())
}

/// Clinic dashboard with the first patient selected.
pub async fn doctor_dashboard(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_doctor_page(&state, None).await
}

/// Clinic dashboard with `id` selected.
pub async fn doctor_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = normalize_patient_id(&id)?;
    render_doctor_page(&state, Some(id)).await
}

async fn render_doctor_page(
    state: &AppState,
    selected_id: Option<String>,
) -> Result<Html<String>, ApiError> {
    let rows = state.store.list_patients().await?;
    let overview = overview(&rows);

    let selected_id = selected_id.or_else(|| overview.default_selection().map(str::to_string));
    let Some(selected_id) = selected_id else {
        return Ok(Html(state.renderer.doctor_page(&overview, None)?));
    };

    let record = state.store.get(&selected_id).await?;
    let dashboard = patient_dashboard(&selected_id, &record)?;
    // Failures come back as an outcome; the rest of the page still renders.
    let outcome = state
        .summaries
        .summary_for(&selected_id, dashboard.latest_score)
        .await;
    let panel = summary_panel(&outcome);

    let selected = SelectedPatient::new(&dashboard, &panel);
    Ok(Html(state.renderer.doctor_page(&overview, Some(&selected))?))
}

pub async fn update_verified(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<VerifiedForm>,
) -> Result<Redirect, ApiError> {
    let id = normalize_patient_id(&id)?;
    state.store.set_verified(&id, form.verified).await?;
    Ok(Redirect::to(&format!("/doctor/patients/{id}")))
}

pub async fn update_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NotesForm>,
) -> Result<Redirect, ApiError> {
    let id = normalize_patient_id(&id)?;
    state.store.set_notes(&id, form.notes).await?;
    Ok(Redirect::to(&format!("/doctor/patients/{id}")))
}

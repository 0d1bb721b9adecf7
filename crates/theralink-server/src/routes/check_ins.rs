use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use theralink_core::models::check_in::CheckIn;
use theralink_instruments::instruments::daily_wellness::DailyWellness;
use theralink_instruments::require_instrument;

use crate::error::ApiError;
use crate::intake::{narrow_responses, submit_check_in};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub patient_id: String,
    pub responses: Vec<i64>,
}

pub async fn create_check_in(
    State(state): State<AppState>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> Result<Json<CheckIn>, ApiError> {
    let Json(request) = payload?;
    let instrument = require_instrument(DailyWellness::ID)?;
    let responses = narrow_responses(instrument.as_ref(), &request.responses)?;

    let check_in = submit_check_in(
        state.store.as_ref(),
        instrument.as_ref(),
        &request.patient_id,
        responses,
        jiff::Zoned::now().date(),
        jiff::Timestamp::now(),
    )
    .await?;

    Ok(Json(check_in))
}

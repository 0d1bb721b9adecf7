use axum::Json;
use serde::Serialize;

use theralink_instruments::instruments::daily_wellness::DailyWellness;
use theralink_instruments::require_instrument;
use theralink_instruments::scoring::Question;

use crate::error::ApiError;

#[derive(Serialize)]
pub struct QuestionnaireDetail {
    id: String,
    name: String,
    questions: Vec<Question>,
}

pub async fn get_questionnaire() -> Result<Json<QuestionnaireDetail>, ApiError> {
    let instrument = require_instrument(DailyWellness::ID)?;

    Ok(Json(QuestionnaireDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        questions: instrument.questions().to_vec(),
    }))
}

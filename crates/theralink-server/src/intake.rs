//! Patient check-in submission: validate, score, append.

use thiserror::Error;
use tracing::info;

use theralink_core::error::CoreError;
use theralink_core::models::check_in::CheckIn;
use theralink_core::models::patient::normalize_patient_id;
use theralink_instruments::Instrument;
use theralink_instruments::error::InstrumentError;
use theralink_instruments::scoring::ValidationError;
use theralink_storage::error::StorageError;
use theralink_storage::store::TriageStore;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error(transparent)]
    PatientId(#[from] CoreError),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntakeError {
    /// Messages to show next to the form. Empty for non-validation errors.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            IntakeError::PatientId(CoreError::InvalidPatientId(msg)) => vec![msg.clone()],
            IntakeError::Instrument(e) => e
                .validation_errors()
                .iter()
                .map(|v| v.message.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Validate and store one check-in for `patient_id`.
///
/// The patient record is created on first submission. Returns the stored
/// check-in.
pub async fn submit_check_in(
    store: &dyn TriageStore,
    instrument: &dyn Instrument,
    patient_id: &str,
    responses: Vec<u8>,
    date: jiff::civil::Date,
    submitted_at: jiff::Timestamp,
) -> Result<CheckIn, IntakeError> {
    let patient_id = normalize_patient_id(patient_id)?;
    let check_in = instrument.check_in(responses, date, submitted_at)?;

    let record = store.append_check_in(&patient_id, check_in.clone()).await?;
    info!(
        patient_id = %patient_id,
        score = check_in.score,
        history_len = record.history.len(),
        "check-in submitted"
    );
    Ok(check_in)
}

/// Narrow raw integer answers (e.g. from JSON) to the response type.
///
/// Values that cannot be a response at all are reported the same way as
/// out-of-range answers.
pub fn narrow_responses(
    instrument: &dyn Instrument,
    raw: &[i64],
) -> Result<Vec<u8>, InstrumentError> {
    let mut responses = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();
    for (i, &value) in raw.iter().enumerate() {
        match u8::try_from(value) {
            Ok(v) => responses.push(v),
            Err(_) => errors.push(ValidationError {
                question_id: instrument.questions().get(i).map(|q| q.id.clone()),
                value: None,
                message: format!(
                    "{}: response {} at position {} is outside the answer scale",
                    instrument.name(),
                    value,
                    i + 1,
                ),
            }),
        }
    }
    if errors.is_empty() {
        Ok(responses)
    } else {
        Err(InstrumentError::Validation(errors))
    }
}

/// Pull answers out of submitted form fields, one per question, keyed by
/// question ID. Missing or unparsable fields are validation errors.
pub fn responses_from_form(
    instrument: &dyn Instrument,
    fields: &[(String, String)],
) -> Result<Vec<u8>, InstrumentError> {
    let mut responses = Vec::with_capacity(instrument.questions().len());
    let mut errors = Vec::new();
    for question in instrument.questions() {
        let value = fields
            .iter()
            .find(|(name, _)| name == &question.id)
            .map(|(_, value)| value.trim());
        match value.map(str::parse::<u8>) {
            Some(Ok(v)) => responses.push(v),
            Some(Err(_)) => errors.push(ValidationError {
                question_id: Some(question.id.clone()),
                value: None,
                message: format!("\"{}\": answer is not a whole number", question.text),
            }),
            None => errors.push(ValidationError {
                question_id: Some(question.id.clone()),
                value: None,
                message: format!("\"{}\": no answer given", question.text),
            }),
        }
    }
    if errors.is_empty() {
        Ok(responses)
    } else {
        Err(InstrumentError::Validation(errors))
    }
}

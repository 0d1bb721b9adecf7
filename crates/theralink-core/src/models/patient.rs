use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::check_in::CheckIn;
use super::overview::PatientOverview;
use super::risk::classify;
use crate::error::CoreError;

/// Longest patient identifier accepted, in characters.
pub const MAX_PATIENT_ID_LEN: usize = 64;

/// Everything the triage store knows about one patient.
///
/// `history` is append-only and in submission order. `notes` and `verified`
/// are overwritten in full by clinician edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub history: Vec<CheckIn>,
    pub notes: String,
    pub verified: bool,
}

impl PatientRecord {
    pub fn latest(&self) -> Option<&CheckIn> {
        self.history.last()
    }

    pub fn latest_score(&self) -> Option<f64> {
        self.latest().map(|c| c.score)
    }

    /// Build the overview row for this record. `None` when the history is
    /// empty.
    pub fn overview(&self, patient_id: &str) -> Option<PatientOverview> {
        let latest_score = self.latest_score()?;
        Some(PatientOverview {
            patient_id: patient_id.to_string(),
            latest_score,
            risk: classify(latest_score),
        })
    }
}

/// Trim and validate an externally supplied patient identifier.
///
/// Identifiers double as object-key and URL path segments, so only ASCII
/// letters, digits, `-`, `_` and `.` are accepted.
pub fn normalize_patient_id(raw: &str) -> Result<String, CoreError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(CoreError::InvalidPatientId(
            "patient id must not be empty".to_string(),
        ));
    }
    if id.len() > MAX_PATIENT_ID_LEN {
        return Err(CoreError::InvalidPatientId(format!(
            "patient id must be at most {MAX_PATIENT_ID_LEN} characters"
        )));
    }
    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(CoreError::InvalidPatientId(format!(
            "patient id contains a forbidden character: {c:?}"
        )));
    }
    if !id.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::InvalidPatientId(format!(
            "patient id must contain a letter or digit: {id:?}"
        )));
    }
    Ok(id.to_string())
}

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Defines the valid range for a single response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    /// Five-point Likert scale, whole numbers only.
    pub const LIKERT_5: ScoreRange = ScoreRange {
        min: 1.0,
        max: 5.0,
        step: Some(1.0),
    };

    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// One question in a questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub range: ScoreRange,
    /// Value the input control starts at.
    pub default_value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    /// The offending question, or `None` for errors about the submission as
    /// a whole (e.g. wrong number of answers).
    pub question_id: Option<String>,
    pub value: Option<u8>,
    pub message: String,
}

/// Arithmetic mean of `responses`, rounded to two decimal places.
///
/// Returns `None` for an empty slice.
pub fn mean_score(responses: &[u8]) -> Option<f64> {
    if responses.is_empty() {
        return None;
    }
    let sum: u32 = responses.iter().map(|&r| u32::from(r)).sum();
    // Work in hundredths so the result is the nearest f64 to the decimal.
    let hundredths = (f64::from(sum) * 100.0 / responses.len() as f64).round();
    Some(hundredths / 100.0)
}

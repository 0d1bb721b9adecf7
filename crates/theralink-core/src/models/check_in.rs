use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One submitted questionnaire for a patient.
///
/// `score` is always the mean of `responses` rounded to two decimals. Values
/// are built by the intake path and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckIn {
    pub date: jiff::civil::Date,
    pub score: f64,
    pub responses: Vec<u8>,
    pub submitted_at: jiff::Timestamp,
}

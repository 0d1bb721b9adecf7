use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::risk::RiskTier;

/// One row of the clinic triage overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientOverview {
    pub patient_id: String,
    pub latest_score: f64,
    pub risk: RiskTier,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::token_count::TokenCount;

/// A session prep summary produced by the text-generation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub id: Uuid,
    pub patient_id: String,
    pub score: f64,
    pub text: String,
    pub model_id: String,
    pub usage: Option<TokenCount>,
    pub created_at: jiff::Timestamp,
}

/// Where the summary shown to the clinician came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SummarySource {
    /// Fresh model call for this score.
    Generated,
    /// Reused from an earlier call for the same patient and score.
    Cached,
    /// The model call failed; this is the last summary generated for the
    /// patient, possibly for an older score.
    Stale,
}

/// Result of asking for a summary. Generation failures are folded into
/// `Unavailable` so the dashboard can keep rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum SummaryOutcome {
    Ready {
        source: SummarySource,
        summary: SessionSummary,
        error: Option<String>,
    },
    Unavailable {
        error: String,
    },
}

use std::collections::HashMap;

use theralink_core::models::summary::SessionSummary;

/// Scores are stored with two decimals; key on hundredths so equal scores
/// hash equally.
fn score_key(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Generated summaries, keyed by `(patient_id, score)`.
#[derive(Debug, Default)]
pub struct SummaryCache {
    by_score: HashMap<(String, i64), SessionSummary>,
    latest: HashMap<String, SessionSummary>,
}

impl SummaryCache {
    pub fn get(&self, patient_id: &str, score: f64) -> Option<&SessionSummary> {
        self.by_score.get(&(patient_id.to_string(), score_key(score)))
    }

    /// Most recently inserted summary for the patient, whatever its score.
    pub fn latest(&self, patient_id: &str) -> Option<&SessionSummary> {
        self.latest.get(patient_id)
    }

    pub fn insert(&mut self, summary: SessionSummary) {
        self.latest
            .insert(summary.patient_id.clone(), summary.clone());
        self.by_score
            .insert((summary.patient_id.clone(), score_key(summary.score)), summary);
    }
}

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use theralink_core::models::summary::{SessionSummary, SummaryOutcome, SummarySource};

use crate::cache::SummaryCache;
use crate::error::GenerationError;
use crate::generator::{Completion, TextGenerator};
use crate::prompt::build_summary_prompt;

/// Generates session prep summaries and remembers them per patient and
/// score, so re-rendering a dashboard never repeats an external call.
pub struct SummaryService {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    cache: Mutex<SummaryCache>,
}

impl SummaryService {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            generator,
            timeout,
            cache: Mutex::new(SummaryCache::default()),
        }
    }

    pub fn model_id(&self) -> &str {
        self.generator.model_id()
    }

    /// Call the model for a score. Uncached; every call reaches the
    /// external service.
    pub async fn generate_summary(&self, score: f64) -> Result<Completion, GenerationError> {
        let prompt = build_summary_prompt(score);
        let completion = tokio::time::timeout(self.timeout, self.generator.complete(&prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))??;

        if completion.text.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        Ok(completion)
    }

    /// Summary for a patient's latest score.
    ///
    /// Served from cache when the same score was summarized before. On
    /// generation failure, falls back to the patient's most recent summary
    /// marked [`SummarySource::Stale`], or to `Unavailable` when there is
    /// none. Never fails.
    pub async fn summary_for(&self, patient_id: &str, score: f64) -> SummaryOutcome {
        if let Some(summary) = self.cache.lock().await.get(patient_id, score).cloned() {
            info!(patient_id, score, "summary cache hit");
            return SummaryOutcome::Ready {
                source: SummarySource::Cached,
                summary,
                error: None,
            };
        }

        // The lock is not held across the model call.
        match self.generate_summary(score).await {
            Ok(completion) => {
                let summary = SessionSummary {
                    id: Uuid::new_v4(),
                    patient_id: patient_id.to_string(),
                    score,
                    text: completion.text,
                    model_id: self.model_id().to_string(),
                    usage: completion.usage,
                    created_at: jiff::Timestamp::now(),
                };
                info!(patient_id, score, summary_id = %summary.id, "summary generated");
                self.cache.lock().await.insert(summary.clone());
                SummaryOutcome::Ready {
                    source: SummarySource::Generated,
                    summary,
                    error: None,
                }
            }
            Err(e) => {
                warn!(patient_id, score, error = %e, "summary generation failed");
                match self.cache.lock().await.latest(patient_id).cloned() {
                    Some(summary) => SummaryOutcome::Ready {
                        source: SummarySource::Stale,
                        summary,
                        error: Some(e.to_string()),
                    },
                    None => SummaryOutcome::Unavailable {
                        error: e.to_string(),
                    },
                }
            }
        }
    }

    /// Cached summary for exactly this patient and score, if any.
    pub async fn cached(&self, patient_id: &str, score: f64) -> Option<SessionSummary> {
        self.cache.lock().await.get(patient_id, score).cloned()
    }
}

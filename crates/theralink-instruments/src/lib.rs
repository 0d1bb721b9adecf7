//! theralink-instruments
//!
//! Questionnaire definitions. Pure data, no AWS dependency.
//! Defines the questions, response ranges, and scoring rule for each
//! supported instrument, and turns a set of answers into a [`CheckIn`].

pub mod error;
pub mod instruments;
pub mod scoring;

use error::InstrumentError;
use scoring::{Question, ValidationError, mean_score};
use theralink_core::models::check_in::CheckIn;

/// Trait implemented by each questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "daily_wellness").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// The questions, in the order answers are expected.
    fn questions(&self) -> &[Question];

    /// Validate a full set of answers against this instrument's rules.
    ///
    /// Checks the answer count first; per-question range checks only run
    /// when the count matches.
    fn validate_responses(&self, responses: &[u8]) -> Vec<ValidationError> {
        let questions = self.questions();
        if responses.len() != questions.len() {
            return vec![ValidationError {
                question_id: None,
                value: None,
                message: format!(
                    "{}: expected {} responses, got {}",
                    self.name(),
                    questions.len(),
                    responses.len(),
                ),
            }];
        }

        let mut errors = Vec::new();
        for (question, &value) in questions.iter().zip(responses) {
            if !question.range.contains(f64::from(value)) {
                errors.push(ValidationError {
                    question_id: Some(question.id.clone()),
                    value: Some(value),
                    message: format!(
                        "{}: response {} to \"{}\" is outside range [{}, {}]",
                        self.name(),
                        value,
                        question.text,
                        question.range.min,
                        question.range.max,
                    ),
                });
            }
        }
        errors
    }

    /// Validate and score a submission, producing the check-in to store.
    fn check_in(
        &self,
        responses: Vec<u8>,
        date: jiff::civil::Date,
        submitted_at: jiff::Timestamp,
    ) -> Result<CheckIn, InstrumentError> {
        let errors = self.validate_responses(&responses);
        if !errors.is_empty() {
            return Err(InstrumentError::Validation(errors));
        }
        let score = mean_score(&responses).ok_or_else(|| ValidationError {
            question_id: None,
            value: None,
            message: format!("{}: no responses", self.name()),
        })?;
        Ok(CheckIn {
            date,
            score,
            responses,
            submitted_at,
        })
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::daily_wellness::DailyWellness)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument by ID, failing with [`InstrumentError::UnknownInstrument`].
pub fn require_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}

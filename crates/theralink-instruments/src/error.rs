use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),
}

impl InstrumentError {
    /// Validation errors carried by this error, empty for other variants.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            InstrumentError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<ValidationError> for InstrumentError {
    fn from(e: ValidationError) -> Self {
        InstrumentError::Validation(vec![e])
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

use std::time::Duration;

use thiserror::Error;

/// Failure of an external text-generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model returned an empty completion")]
    EmptyCompletion,

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid generation settings: {0}")]
    Config(String),
}

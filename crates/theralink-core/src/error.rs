use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid patient id: {0}")]
    InvalidPatientId(String),
}

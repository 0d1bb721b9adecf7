use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use theralink_core::error::CoreError;
use theralink_dashboard::error::DashboardError;
use theralink_instruments::error::InstrumentError;
use theralink_storage::error::StorageError;

use crate::intake::IntakeError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Rejected input, one message per problem.
    Validation(Vec<String>),
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                "validation failed".to_string(),
                details,
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                details,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape: missing fields, wrong types.
            JsonRejection::JsonDataError(_) => ApiError::Validation(vec![rejection.body_text()]),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::PatientNotFound { .. } => ApiError::NotFound(e.to_string()),
            StorageError::PreconditionFailed { .. } => ApiError::Conflict(format!(
                "{e}; the record changed concurrently, reload and try again"
            )),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidPatientId(msg) => ApiError::Validation(vec![msg]),
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::Validation(errors) => {
                ApiError::Validation(errors.into_iter().map(|e| e.message).collect())
            }
            InstrumentError::UnknownInstrument(id) => {
                ApiError::NotFound(format!("instrument not found: {id}"))
            }
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::MissingHistory { .. } => ApiError::Conflict(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::PatientId(e) => e.into(),
            IntakeError::Instrument(e) => e.into(),
            IntakeError::Storage(e) => e.into(),
        }
    }
}

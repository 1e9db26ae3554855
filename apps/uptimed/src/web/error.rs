use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uptime_probe::ValidationError;

use crate::{formatter::FormatError, pipeline::supervisor::SubmitError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidJson(#[from] JsonRejection),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidJson(rejection) => (rejection.status(), rejection.body_text()),
            AppError::InvalidInput(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        (status, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<FormatError> for AppError {
    fn from(err: FormatError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        AppError::ServiceUnavailable(err.to_string())
    }
}

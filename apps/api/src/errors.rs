use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::RenderError;
use crate::sources::{ExtractError, FetchError};

const TAILORING_FAILED_MESSAGE: &str = "Failed to process job data or resume";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Job source error: {0}")]
    JobSource(String),

    #[error("Resume source error: {0}")]
    ResumeSource(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::JobSource(e.to_string())
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        AppError::ResumeSource(e.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::JobSource(detail) => {
                tracing::error!("Job source error: {detail}");
                tailoring_failed(detail)
            }
            AppError::ResumeSource(detail) => {
                tracing::error!("Resume source error: {detail}");
                tailoring_failed(detail)
            }
            AppError::Render(detail) => {
                tracing::error!("Render error: {detail}");
                tailoring_failed(detail)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

fn tailoring_failed(detail: &str) -> (StatusCode, &'static str, String, Option<String>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "TAILORING_FAILED",
        TAILORING_FAILED_MESSAGE.to_string(),
        Some(detail.to_string()),
    )
}

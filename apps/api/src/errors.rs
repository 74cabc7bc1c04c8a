use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::GenerationError;
use crate::job_posting::fetcher::FetchError;
use crate::resume::pdf_text::PdfTextError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Absent data never lands here: missing markup, empty documents and non-2xx
/// job pages degrade to sentinel values upstream.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Network error: {0}")]
    Network(#[from] FetchError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PdfTextError> for AppError {
    fn from(err: PdfTextError) -> Self {
        AppError::UnprocessableEntity(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Network(e) => {
                tracing::warn!("Job posting fetch failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "NETWORK_ERROR",
                    format!("Could not reach the job posting: {e}"),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "The cover letter model failed to produce a letter".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

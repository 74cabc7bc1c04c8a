//! Axum route handler for resume upload.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::pdf_text::extract_lines;
use crate::resume::{infer_fields, ResumeFields, ResumePrefill};
use crate::state::AppState;

/// Multipart field carrying the PDF.
pub const RESUME_FIELD: &str = "resume";

/// Browsers and HTTP clients label PDF uploads with either type; the parser
/// rejects anything that is not really a PDF.
const ACCEPTED_CONTENT_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub fields: ResumeFields,
    pub prefill: ResumePrefill,
}

/// POST /api/v1/resume
///
/// Extracts text from the uploaded PDF and infers the applicant fields.
/// A document without extractable text (e.g. a scan) yields empty fields, not an error.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeResponse>, AppError> {
    let pdf = read_resume_field(&mut multipart, state.config.max_upload_bytes).await?;
    info!("Received resume upload ({} bytes)", pdf.len());

    let fields = tokio::task::spawn_blocking(move || {
        extract_lines(&pdf).map(|lines| {
            info!("Extracted {} lines from resume", lines.len());
            infer_fields(&lines)
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("resume extraction task failed: {e}")))??;

    Ok(Json(ResumeResponse {
        prefill: fields.prefill(),
        fields,
    }))
}

async fn read_resume_field(multipart: &mut Multipart, max_bytes: usize) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        if let Some(content_type) = field.content_type() {
            if !ACCEPTED_CONTENT_TYPES.contains(&content_type) {
                return Err(AppError::UnprocessableEntity(format!(
                    "resume must be a PDF, got '{content_type}'"
                )));
            }
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        if data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "resume is {} bytes; the limit is {max_bytes}",
                data.len()
            )));
        }
        return Ok(data);
    }

    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

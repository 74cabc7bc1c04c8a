//! Axum route handler for letter generation.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::job_posting::split_qualifications;
use crate::letter::{write_letter, GeneratedLetter, PromptFields};
use crate::state::AppState;

/// The form as submitted. Qualifications arrive as the single edited text field.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoverLetterRequest {
    pub job_title: String,
    pub preferred_qualifications: String,
    pub hiring_company: String,
    pub applicant_name: String,
    pub past_experience: String,
    pub current_experience: Option<String>,
    pub skillsets: String,
    pub qualifications: String,
}

impl From<CoverLetterRequest> for PromptFields {
    fn from(request: CoverLetterRequest) -> Self {
        PromptFields {
            job_title: request.job_title,
            preferred_qualifications: split_qualifications(&request.preferred_qualifications),
            hiring_company: request.hiring_company,
            applicant_name: request.applicant_name,
            past_experience: request.past_experience,
            current_experience: request.current_experience,
            skillsets: request.skillsets,
            qualifications: request.qualifications,
        }
    }
}

/// POST /api/v1/cover-letter
///
/// Composes the prompt, runs the model and returns the raw and formatted letter.
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<GeneratedLetter>, AppError> {
    let fields = PromptFields::from(request);
    let letter = write_letter(state.model.as_ref(), &fields).await?;
    Ok(Json(letter))
}

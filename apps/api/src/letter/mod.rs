//! Letter pipeline: edited fields -> prompt -> model -> paragraph breaks.

pub mod composer;
pub mod handlers;
pub mod postprocess;

use tracing::info;

use crate::generation::{GenerationError, LetterModel};

pub use composer::{compose_prompt, PromptFields};
pub use postprocess::GeneratedLetter;

/// Runs one generation. Model failures propagate unchanged; there is no retry.
pub async fn write_letter(
    model: &dyn LetterModel,
    fields: &PromptFields,
) -> Result<GeneratedLetter, GenerationError> {
    let prompt = compose_prompt(fields);
    info!(
        "Writing cover letter for '{}' at '{}' with {}",
        fields.job_title,
        fields.hiring_company,
        model.model_id()
    );

    let raw = model.generate(&prompt).await?;
    Ok(GeneratedLetter::new(prompt, raw))
}

//! Generation Adapter: the seam between the letter pipeline and the pretrained model.
//!
//! The pipeline depends only on `LetterModel`. `main` constructs exactly one
//! `InferenceClient` at startup and shares it through `AppState` as
//! `Arc<dyn LetterModel>`; nothing reaches for a global.

pub mod inference_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use inference_client::InferenceClient;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty output")]
    EmptyOutput,

    #[error("generation timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("generation queue closed")]
    QueueClosed,
}

/// Fixed decoding hyperparameters the cover letter model was tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingConfig {
    pub num_beams: u32,
    /// Output length in tokens.
    pub max_length: u32,
    pub no_repeat_ngram_size: u32,
    pub early_stopping: bool,
    /// Input is truncated/padded to this many tokens. Enforced by the server's
    /// tokenizer through `truncation`; not a generation parameter, so never sent.
    #[serde(skip_serializing)]
    pub max_input_length: u32,
    pub truncation: bool,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            num_beams: 5,
            max_length: 512,
            no_repeat_ngram_size: 2,
            early_stopping: true,
            max_input_length: 512,
            truncation: true,
        }
    }
}

/// A pretrained encoder-decoder model that turns a flat prompt into a letter.
///
/// Implementations hold read-only model state; calls may come from many
/// requests at once.
#[async_trait]
pub trait LetterModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier, for logs and the health endpoint.
    fn model_id(&self) -> &str;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decoding_matches_model_card() {
        let config = DecodingConfig::default();
        assert_eq!(config.num_beams, 5);
        assert_eq!(config.max_length, 512);
        assert_eq!(config.no_repeat_ngram_size, 2);
        assert!(config.early_stopping);
        assert_eq!(config.max_input_length, 512);
    }
}

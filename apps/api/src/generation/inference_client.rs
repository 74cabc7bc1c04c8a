//! Inference client: runs the cover letter model behind a text2text inference endpoint.
//!
//! RULE: this is the only place that talks to the model. Calls are admitted
//! through a semaphore so concurrent form submissions queue instead of
//! competing for the same model instance. No retries: a failed call is
//! reported to the user as-is.
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::generation::{DecodingConfig, GenerationError, LetterModel};

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a DecodingConfig,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Endpoints answer with a list of candidates or, for some servers, a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl InferenceResponse {
    fn into_text(self) -> Option<String> {
        match self {
            InferenceResponse::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
            InferenceResponse::Single(item) => Some(item.generated_text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

pub struct InferenceClient {
    client: Client,
    endpoint: String,
    model_id: String,
    api_token: Option<String>,
    decoding: DecodingConfig,
    timeout_secs: u64,
    gate: Semaphore,
}

impl InferenceClient {
    /// Builds the process-wide client. Called once from `main`.
    pub fn new(config: &Config, decoding: DecodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()
            .context("Failed to build HTTP client for the inference endpoint")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}",
                config.inference_url, config.generation_model
            ),
            model_id: config.generation_model.clone(),
            api_token: config.inference_api_token.clone(),
            decoding,
            timeout_secs: config.generation_timeout_secs,
            gate: Semaphore::new(config.max_concurrent_generations),
        })
    }

    async fn call(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: &self.decoding,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<InferenceErrorBody>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            warn!("Inference endpoint returned {}: {}", status, message);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_generated_text(&text)
    }

    fn map_transport(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            GenerationError::Http(err)
        }
    }
}

#[async_trait]
impl LetterModel for InferenceClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| GenerationError::QueueClosed)?;

        let started = Instant::now();
        debug!("Generating letter from {}-char prompt", prompt.len());
        let letter = self.call(prompt).await?;
        info!(
            "Generated {}-char letter with {} in {}ms",
            letter.len(),
            self.model_id,
            started.elapsed().as_millis()
        );
        Ok(letter)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn parse_generated_text(body: &str) -> Result<String, GenerationError> {
    let response: InferenceResponse = serde_json::from_str(body)?;
    response
        .into_text()
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerationError::EmptyOutput)
}

use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "KarthikeyanJRKIyer/cover_letter_generator";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Which model weights the inference endpoint serves for us.
    pub generation_model: String,
    pub inference_url: String,
    pub inference_api_token: Option<String>,
    pub max_upload_bytes: usize,
    pub fetch_timeout_secs: u64,
    pub generation_timeout_secs: u64,
    pub max_concurrent_generations: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            generation_model: std::env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            inference_url: std::env::var("INFERENCE_URL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            inference_api_token: std::env::var("INFERENCE_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 30)?,
            generation_timeout_secs: parse_env("GENERATION_TIMEOUT_SECS", 120)?,
            max_concurrent_generations: parse_env::<usize>("MAX_CONCURRENT_GENERATIONS", 1)?
                .max(1),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for handler tests; never touches the environment.
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            generation_model: DEFAULT_MODEL.to_string(),
            inference_url: "http://127.0.0.1:9".to_string(),
            inference_api_token: None,
            max_upload_bytes: 1024 * 1024,
            fetch_timeout_secs: 5,
            generation_timeout_secs: 5,
            max_concurrent_generations: 1,
        }
    }
}

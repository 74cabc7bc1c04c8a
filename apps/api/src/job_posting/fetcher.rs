use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{info, warn};

use crate::job_posting::parser::parse_job_posting;
use crate::job_posting::JobPosting;

/// Job boards reject requests without a browser-like agent.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Connection-level failures. HTTP error statuses are not errors here:
/// they produce the "Not found" posting instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid job posting URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Fetches one job posting page per call. One shared instance per process.
#[derive(Clone)]
pub struct JobPostingFetcher {
    client: Client,
}

impl JobPostingFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for job postings")?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<JobPosting, FetchError> {
        let url = parse_url(url)?;
        info!("Fetching job posting: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Job posting {} returned {}; using placeholders", url, status);
            return Ok(JobPosting::not_found());
        }

        let html = response.text().await.map_err(FetchError::Body)?;
        let posting = parse_job_posting(&html);

        info!(
            "Extracted job posting: {} at {} ({} preferred qualifications)",
            posting.title,
            posting.company,
            posting.preferred_qualifications.len()
        );
        Ok(posting)
    }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

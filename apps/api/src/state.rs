use std::sync::Arc;

use crate::config::Config;
use crate::generation::LetterModel;
use crate::job_posting::JobPostingFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub fetcher: JobPostingFetcher,
    /// Loaded once at startup; read-only afterwards.
    pub model: Arc<dyn LetterModel>,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(model: Arc<dyn LetterModel>) -> Self {
        let config = Config::for_tests();
        let fetcher = JobPostingFetcher::new(std::time::Duration::from_secs(
            config.fetch_timeout_secs,
        ))
        .unwrap();
        Self {
            config,
            fetcher,
            model,
        }
    }
}

pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::job_posting::handlers as job_posting;
use crate::letter::handlers as letter;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the PDF itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(form::form_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/job-posting",
            post(job_posting::handle_fetch_job_posting),
        )
        .route("/api/v1/resume", post(resume::handle_upload_resume))
        .route("/api/v1/cover-letter", post(letter::handle_generate_letter))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

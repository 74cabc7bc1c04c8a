//! Axum route handlers for the job posting side of the form.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::job_posting::fetcher::FetchError;
use crate::job_posting::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobPostingRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct JobPostingResponse {
    #[serde(flatten)]
    pub posting: JobPosting,
    /// Qualifications as one editable field.
    pub preferred_qualifications_text: String,
}

/// POST /api/v1/job-posting
///
/// Fetches the posting and returns the fields used to pre-fill the form.
/// Pages that answer with an error status come back as "Not found" placeholders.
pub async fn handle_fetch_job_posting(
    State(state): State<AppState>,
    Json(request): Json<JobPostingRequest>,
) -> Result<Json<JobPostingResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let posting = state.fetcher.fetch(&request.url).await.map_err(|e| match e {
        FetchError::InvalidUrl { .. } => AppError::Validation(e.to_string()),
        other => AppError::Network(other),
    })?;

    Ok(Json(JobPostingResponse {
        preferred_qualifications_text: posting.preferred_qualifications_text(),
        posting,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, response::Html, routing::get, Router};
    use serde_json::json;

    use crate::generation::testing::StubModel;
    use crate::routes::test_support::post_json;
    use crate::state::AppState;

    fn state() -> AppState {
        AppState::for_tests(Arc::new(StubModel::replying("unused")))
    }

    async fn spawn_job_board() -> String {
        let app = Router::new().route(
            "/jobs/7",
            get(|| async {
                Html(
                    r#"<h1>Data Engineer</h1><p>at <a href="/c">Globex</a>.</p>
                       <p>3 years of Python. Experience with Airflow. Free snacks.</p>"#,
                )
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_fetch_returns_posting_and_joined_qualifications() {
        let base = spawn_job_board().await;
        let (status, body) = post_json(
            state(),
            "/api/v1/job-posting",
            json!({ "url": format!("{base}/jobs/7") }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Data Engineer");
        assert_eq!(body["company"], "Globex");
        assert_eq!(
            body["preferred_qualifications"],
            json!(["3 years of Python", "Experience with Airflow"])
        );
        assert_eq!(
            body["preferred_qualifications_text"],
            "3 years of Python, Experience with Airflow"
        );
    }

    #[tokio::test]
    async fn test_missing_page_returns_placeholders() {
        let base = spawn_job_board().await;
        let (status, body) = post_json(
            state(),
            "/api/v1/job-posting",
            json!({ "url": format!("{base}/jobs/404") }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Not found");
        assert_eq!(body["company"], "Not found");
        assert_eq!(body["preferred_qualifications_text"], "");
    }

    #[tokio::test]
    async fn test_blank_url_is_rejected() {
        let (status, body) =
            post_json(state(), "/api/v1/job-posting", json!({ "url": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_rejected() {
        let (status, _) =
            post_json(state(), "/api/v1/job-posting", json!({ "url": "ftp://jobs.example.com" }))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (status, body) = post_json(
            state(),
            "/api/v1/job-posting",
            json!({ "url": format!("http://{addr}/jobs/1") }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "NETWORK_ERROR");
    }
}

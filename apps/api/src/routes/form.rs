use axum::response::Html;

const FORM_PAGE: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page form. The letter renders in an A4-sized (595x842) scroll box.
pub async fn form_handler() -> Html<&'static str> {
    Html(FORM_PAGE)
}

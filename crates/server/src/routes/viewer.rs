use axum::response::Html;

const VIEWER_HTML: &str = include_str!("../../assets/viewer.html");

/// /logs: the viewer page, for any method.
pub async fn page() -> Html<&'static str> {
    Html(VIEWER_HTML)
}

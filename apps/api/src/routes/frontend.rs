use axum::response::{Html, Redirect};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
pub async fn handle_root() -> Redirect {
    Redirect::to("/app")
}

/// GET /app
pub async fn handle_app() -> Html<&'static str> {
    Html(INDEX_HTML)
}

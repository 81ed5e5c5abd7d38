//! The browser UI: a single embedded HTML page served at `/`.

use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::{routing::get, Router};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / -- the single-page story creator UI.
async fn index() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Html(INDEX_HTML),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

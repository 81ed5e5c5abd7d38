pub mod health;
pub mod jobs;
pub mod stories;
pub mod ui;
pub mod videos;

use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (pipeline progress)
///
/// /stories                             list, create (spawn story job)
/// /stories/{id}                        get, delete
/// /stories/{id}/download               download story JSON
/// /stories/{id}/video                  create video (spawn job), get video
///
/// /videos                              list rendered videos
/// /videos/{file_name}                  download, delete
///
/// /jobs/{id}                           job status
/// /jobs/{id}/cancel                    cancel a running job
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(ws::router())
        .nest("/stories", stories::router())
        .nest("/videos", videos::router())
        .nest("/jobs", jobs::router())
}

//! Route definitions for the rendered video library.
//!
//! Mounted at `/videos`. Videos are identified by file name within the
//! `videos/` output directory; traversal outside it is rejected.
//!
//! ```text
//! GET    /                 list_videos
//! GET    /{file_name}      download_video
//! DELETE /{file_name}      delete_video
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(videos::list_videos))
        .route(
            "/{file_name}",
            get(videos::download_video).delete(videos::delete_video),
        )
}

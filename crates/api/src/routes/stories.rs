//! Route definitions for story management.
//!
//! Mounted at `/stories`.
//!
//! ```text
//! GET    /                      list_stories
//! POST   /                      create_story (spawns a generation job)
//! GET    /{id}                  get_story
//! DELETE /{id}                  delete_story
//! GET    /{id}/download         download_story (JSON attachment)
//! POST   /{id}/video            create_video (spawns a production job)
//! GET    /{id}/video            get_video (rendered MP4)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::stories;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stories::list_stories).post(stories::create_story))
        .route(
            "/{id}",
            get(stories::get_story).delete(stories::delete_story),
        )
        .route("/{id}/download", get(stories::download_story))
        .route(
            "/{id}/video",
            post(stories::create_video).get(stories::get_video),
        )
}

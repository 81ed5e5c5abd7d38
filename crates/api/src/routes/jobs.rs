//! Route definitions for background job status and cancellation.
//!
//! Mounted at `/jobs`.
//!
//! ```text
//! GET  /{id}            get_job
//! POST /{id}/cancel     cancel_job
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(jobs::get_job))
        .route("/{id}/cancel", post(jobs::cancel_job))
}

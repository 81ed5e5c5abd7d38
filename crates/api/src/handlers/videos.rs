//! Handlers for the rendered video library.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use wildtale_store::StoreError;

use crate::error::{AppError, AppResult};
use crate::handlers::stories::serve_video_file;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /videos
// ---------------------------------------------------------------------------

/// List every rendered video in the library with its size.
pub async fn list_videos(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let videos = state.store.list_videos().await?;
    Ok(Json(DataResponse { data: videos }))
}

// ---------------------------------------------------------------------------
// GET /videos/{file_name}
// ---------------------------------------------------------------------------

/// Download a rendered video by file name.
pub async fn download_video(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    serve_video_file(&state, &file_name).await
}

// ---------------------------------------------------------------------------
// DELETE /videos/{file_name}
// ---------------------------------------------------------------------------

/// Remove a rendered video from the library. The story it came from is
/// left untouched.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let path = state.store.video_path(&file_name)?;
    tokio::fs::remove_file(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::Store(StoreError::FileNotFound(file_name.clone()))
        } else {
            AppError::InternalError(e.to_string())
        }
    })?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for story creation, retrieval, and video production.
//!
//! Story and video generation both run as background jobs; the create
//! endpoints answer `202 Accepted` with a job id the client can poll
//! (or watch over the WebSocket).

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use wildtale_core::story::{StoryStatus, Voice, DEFAULT_SCENES};
use wildtale_core::types::{StoryId, Timestamp};
use wildtale_core::CoreError;
use wildtale_store::StoredStory;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, JobAccepted};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateStoryRequest {
    /// Animal the story is about, e.g. "red panda".
    pub animal: String,
    /// Number of scenes to generate; defaults to [`DEFAULT_SCENES`].
    pub num_scenes: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    /// Narration voice; defaults to [`Voice::Alloy`].
    #[serde(default)]
    pub voice: Voice,
}

/// Compact story listing entry. The full scene list is only returned by
/// the single-story endpoint.
#[derive(Debug, Serialize)]
pub struct StorySummary {
    pub id: StoryId,
    pub animal: String,
    pub story_title: String,
    pub num_scenes: usize,
    pub total_duration: f64,
    pub status: StoryStatus,
    pub created_at: Timestamp,
    pub file_name: String,
    pub video_file: Option<String>,
}

impl From<StoredStory> for StorySummary {
    fn from(stored: StoredStory) -> Self {
        let StoredStory { story, file_name } = stored;
        Self {
            id: story.id,
            animal: story.animal,
            story_title: story.story_title,
            num_scenes: story.scenes.len(),
            total_duration: story.total_duration,
            status: story.status,
            created_at: story.created_at,
            file_name,
            video_file: story.video_file,
        }
    }
}

fn story_not_found(id: StoryId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Story", id })
}

// ---------------------------------------------------------------------------
// GET /stories
// ---------------------------------------------------------------------------

/// List all stories, newest first.
pub async fn list_stories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stories = state.store.list().await?;
    let summaries: Vec<StorySummary> = stories.into_iter().map(StorySummary::from).collect();
    Ok(Json(DataResponse { data: summaries }))
}

// ---------------------------------------------------------------------------
// POST /stories
// ---------------------------------------------------------------------------

/// Spawn a story-generation job. Answers 202 with the job id.
pub async fn create_story(
    State(state): State<AppState>,
    Json(input): Json<CreateStoryRequest>,
) -> AppResult<impl IntoResponse> {
    let num_scenes = input.num_scenes.unwrap_or(DEFAULT_SCENES);
    let job_id = state
        .pipeline
        .spawn_story_job(input.animal, num_scenes)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: JobAccepted { job_id },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /stories/{id}
// ---------------------------------------------------------------------------

/// Fetch a single story with its full scene list.
pub async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
) -> AppResult<impl IntoResponse> {
    let stored = state.store.load(id).await?;
    Ok(Json(DataResponse { data: stored.story }))
}

// ---------------------------------------------------------------------------
// DELETE /stories/{id}
// ---------------------------------------------------------------------------

/// Delete a story, its generated assets, and its rendered video.
pub async fn delete_story(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
) -> AppResult<impl IntoResponse> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /stories/{id}/download
// ---------------------------------------------------------------------------

/// Download the raw story JSON as a file attachment.
pub async fn download_story(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
) -> AppResult<impl IntoResponse> {
    let (file_name, bytes) = state.store.read_story_bytes(id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}

// ---------------------------------------------------------------------------
// POST /stories/{id}/video
// ---------------------------------------------------------------------------

/// Spawn a video-production job for the story. Answers 202 with the job id.
pub async fn create_video(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
    Json(input): Json<CreateVideoRequest>,
) -> AppResult<impl IntoResponse> {
    let job_id = state.pipeline.spawn_video_job(id, input.voice).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: JobAccepted { job_id },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /stories/{id}/video
// ---------------------------------------------------------------------------

/// Fetch the rendered MP4 for a story. 404 until production has finished.
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<StoryId>,
) -> AppResult<impl IntoResponse> {
    let stored = state.store.load(id).await?;
    let file_name = stored.story.video_file.ok_or_else(|| story_not_found(id))?;

    serve_video_file(&state, &file_name).await
}

/// Read a video from the library and serve it with download headers.
pub(crate) async fn serve_video_file(
    state: &AppState,
    file_name: &str,
) -> AppResult<impl IntoResponse> {
    let path = state.store.video_path(file_name)?;
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::Store(wildtale_store::StoreError::FileNotFound(
                file_name.to_string(),
            ))
        } else {
            AppError::InternalError(e.to_string())
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "video/mp4".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}

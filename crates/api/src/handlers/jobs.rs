//! Handlers for background job status and cancellation.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use wildtale_core::types::JobId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn job_not_found(id: JobId) -> AppError {
    AppError::Core(wildtale_core::CoreError::NotFound { entity: "Job", id })
}

// ---------------------------------------------------------------------------
// GET /jobs/{id}
// ---------------------------------------------------------------------------

/// Fetch the current snapshot of a job (status, progress, result).
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> AppResult<impl IntoResponse> {
    let job = state
        .pipeline
        .jobs()
        .get(id)
        .await
        .ok_or_else(|| job_not_found(id))?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// POST /jobs/{id}/cancel
// ---------------------------------------------------------------------------

/// Request cancellation of a running job.
///
/// Cancellation is cooperative: the pipeline checks the token between
/// scenes, so in-flight API calls finish before the job stops. Returns
/// 409 if the job has already reached a terminal state.
pub async fn cancel_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> AppResult<impl IntoResponse> {
    let cancelled = state.pipeline.jobs().cancel(id).await;
    if !cancelled {
        // Distinguish unknown from already-finished for a useful message.
        return match state.pipeline.jobs().get(id).await {
            Some(job) => Err(AppError::Core(wildtale_core::CoreError::Conflict(format!(
                "Job is already {:?}",
                job.status
            )))),
            None => Err(job_not_found(id)),
        };
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "cancelled": true }),
    }))
}

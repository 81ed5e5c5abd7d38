//! In-memory job registry.
//!
//! Every generation request becomes a job: a UUID, a status, a percent,
//! and a human-readable stage line. Jobs live only for the lifetime of
//! the process; the durable outputs are the story files and videos.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use wildtale_core::types::{JobId, StoryId, Timestamp};

/// What a job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Generate story text and persist it.
    StoryGeneration,
    /// Produce scene media and assemble the video.
    VideoProduction,
}

/// Lifecycle of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Whether the job has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

/// Snapshot of a job, serialized as-is by the API layer.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: JobId,
    pub kind: JobKind,
    /// The story the job concerns. Unset for story-generation jobs until
    /// the story has been created.
    pub story_id: Option<StoryId>,
    pub status: JobStatus,
    /// Percent complete, 0..=100.
    pub percent: u8,
    /// Human-readable description of the current stage.
    pub stage: String,
    /// Terminal error message, for failed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Job-specific result payload, for completed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

struct JobEntry {
    job: Job,
    cancel: CancellationToken,
}

/// Thread-safe registry of all jobs in this process.
///
/// Designed to be wrapped in `Arc` and shared between the HTTP handlers
/// and the pipeline tasks.
#[derive(Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, JobEntry>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new queued job. Returns its id and the cancellation
    /// token the running task should watch.
    pub async fn create(&self, kind: JobKind, story_id: Option<StoryId>) -> (JobId, CancellationToken) {
        let id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();
        let cancel = CancellationToken::new();
        let job = Job {
            id,
            kind,
            story_id,
            status: JobStatus::Queued,
            percent: 0,
            stage: "Queued".to_string(),
            error: None,
            result: None,
            created_at: now,
            updated_at: now,
        };
        self.jobs.write().await.insert(
            id,
            JobEntry {
                job,
                cancel: cancel.clone(),
            },
        );
        (id, cancel)
    }

    /// Snapshot a job by id.
    pub async fn get(&self, id: JobId) -> Option<Job> {
        self.jobs.read().await.get(&id).map(|e| e.job.clone())
    }

    /// Mark a job as running.
    pub async fn mark_running(&self, id: JobId) {
        self.update(id, |job| {
            job.status = JobStatus::Running;
            job.stage = "Running".to_string();
        })
        .await;
    }

    /// Record progress on a running job.
    pub async fn update_progress(&self, id: JobId, percent: u8, stage: impl Into<String>) {
        let stage = stage.into();
        self.update(id, move |job| {
            job.percent = percent.min(100);
            job.stage = stage;
        })
        .await;
    }

    /// Attach the story id once a story-generation job has produced one.
    pub async fn set_story(&self, id: JobId, story_id: StoryId) {
        self.update(id, move |job| job.story_id = Some(story_id)).await;
    }

    /// Mark a job completed with its result payload.
    pub async fn complete(&self, id: JobId, result: serde_json::Value) {
        self.update(id, move |job| {
            job.status = JobStatus::Completed;
            job.percent = 100;
            job.stage = "Completed".to_string();
            job.result = Some(result);
        })
        .await;
    }

    /// Mark a job failed with an error message.
    pub async fn fail(&self, id: JobId, error: impl Into<String>) {
        let error = error.into();
        self.update(id, move |job| {
            job.status = JobStatus::Failed;
            job.stage = "Failed".to_string();
            job.error = Some(error);
        })
        .await;
    }

    /// Mark a job cancelled (called by the task when it observes the
    /// cancellation token).
    pub async fn mark_cancelled(&self, id: JobId) {
        self.update(id, |job| {
            job.status = JobStatus::Cancelled;
            job.stage = "Cancelled".to_string();
        })
        .await;
    }

    /// Request cancellation of a job. Returns `false` when the job does
    /// not exist or has already finished.
    pub async fn cancel(&self, id: JobId) -> bool {
        let jobs = self.jobs.read().await;
        match jobs.get(&id) {
            Some(entry) if !entry.job.status.is_terminal() => {
                entry.cancel.cancel();
                true
            }
            _ => false,
        }
    }

    /// Trigger cancellation of every non-terminal job. Used during
    /// graceful shutdown.
    pub async fn cancel_all(&self) {
        let jobs = self.jobs.read().await;
        for entry in jobs.values() {
            if !entry.job.status.is_terminal() {
                entry.cancel.cancel();
            }
        }
    }

    async fn update(&self, id: JobId, f: impl FnOnce(&mut Job)) {
        let mut jobs = self.jobs.write().await;
        if let Some(entry) = jobs.get_mut(&id) {
            f(&mut entry.job);
            entry.job.updated_at = chrono::Utc::now();
        } else {
            tracing::warn!(job_id = %id, "Update for unknown job");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_snapshot() {
        let registry = JobRegistry::new();
        let (id, _cancel) = registry.create(JobKind::StoryGeneration, None).await;

        let job = registry.get(id).await.expect("job exists");
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.percent, 0);
        assert_eq!(job.kind, JobKind::StoryGeneration);
    }

    #[tokio::test]
    async fn progress_and_completion() {
        let registry = JobRegistry::new();
        let (id, _cancel) = registry.create(JobKind::VideoProduction, None).await;

        registry.mark_running(id).await;
        registry.update_progress(id, 40, "Scene 2 of 5").await;

        let job = registry.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.percent, 40);
        assert_eq!(job.stage, "Scene 2 of 5");

        registry
            .complete(id, serde_json::json!({"video_file": "a.mp4"}))
            .await;
        let job = registry.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.percent, 100);
        assert_eq!(job.result.unwrap()["video_file"], "a.mp4");
    }

    #[tokio::test]
    async fn percent_is_clamped() {
        let registry = JobRegistry::new();
        let (id, _cancel) = registry.create(JobKind::VideoProduction, None).await;
        registry.update_progress(id, 250, "overflow").await;
        assert_eq!(registry.get(id).await.unwrap().percent, 100);
    }

    #[tokio::test]
    async fn cancel_triggers_token_once() {
        let registry = JobRegistry::new();
        let (id, cancel) = registry.create(JobKind::VideoProduction, None).await;

        assert!(registry.cancel(id).await);
        assert!(cancel.is_cancelled());

        // The task observes the token and records the final state.
        registry.mark_cancelled(id).await;
        assert_eq!(registry.get(id).await.unwrap().status, JobStatus::Cancelled);

        // Cancelling a finished job is a no-op.
        assert!(!registry.cancel(id).await);
    }

    #[tokio::test]
    async fn cancel_unknown_job_returns_false() {
        let registry = JobRegistry::new();
        assert!(!registry.cancel(uuid::Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn failed_job_keeps_error() {
        let registry = JobRegistry::new();
        let (id, _cancel) = registry.create(JobKind::StoryGeneration, None).await;
        registry.fail(id, "API error (500)").await;

        let job = registry.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("API error (500)"));
    }
}

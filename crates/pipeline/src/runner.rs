//! The pipeline orchestrator.
//!
//! Drives the whole flow described by the product: story text from the
//! chat model, a still image and narration audio per scene, one rendered
//! clip per scene, and a single concatenated video. Each request runs as
//! a background job; progress flows through the [`EventBus`] and the
//! [`JobRegistry`].

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use wildtale_core::story::{self, Story, StoryStatus, Voice};
use wildtale_core::types::{JobId, StoryId};
use wildtale_core::{ffmpeg, naming, CoreError};
use wildtale_events::{EventBus, PipelineEvent};
use wildtale_openai::client::DEFAULT_STORY_MODEL;
use wildtale_openai::OpenAiClient;
use wildtale_store::StoryStore;

use crate::error::PipelineError;
use crate::jobs::{JobKind, JobRegistry};
use crate::progress::{self, ScenePhase};

/// Tunable pipeline settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Chat model used for story generation (`STORY_MODEL` env var).
    pub story_model: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            story_model: DEFAULT_STORY_MODEL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load pipeline settings from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            story_model: std::env::var("STORY_MODEL")
                .unwrap_or_else(|_| DEFAULT_STORY_MODEL.to_string()),
        }
    }
}

/// Orchestrates story generation and video production.
///
/// Shared via `Arc<Pipeline>`; each spawned job holds a clone.
pub struct Pipeline {
    openai: Arc<OpenAiClient>,
    store: StoryStore,
    bus: Arc<EventBus>,
    jobs: Arc<JobRegistry>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        openai: Arc<OpenAiClient>,
        store: StoryStore,
        bus: Arc<EventBus>,
        jobs: Arc<JobRegistry>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            openai,
            store,
            bus,
            jobs,
            config,
        }
    }

    /// The job registry backing this pipeline.
    pub fn jobs(&self) -> &Arc<JobRegistry> {
        &self.jobs
    }

    // -----------------------------------------------------------------
    // Story generation
    // -----------------------------------------------------------------

    /// Validate the request and spawn a story-generation job.
    ///
    /// Validation failures are returned synchronously so the API can
    /// answer 400; everything after that happens in the background.
    pub async fn spawn_story_job(
        self: &Arc<Self>,
        animal: String,
        num_scenes: u8,
    ) -> Result<JobId, CoreError> {
        story::validate_animal_name(&animal)?;
        story::validate_scene_count(num_scenes)?;

        let (job_id, cancel) = self.jobs.create(JobKind::StoryGeneration, None).await;
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            pipeline
                .run_story_job(job_id, cancel, animal, num_scenes)
                .await;
        });
        Ok(job_id)
    }

    async fn run_story_job(
        &self,
        job_id: JobId,
        cancel: CancellationToken,
        animal: String,
        num_scenes: u8,
    ) {
        self.jobs.mark_running(job_id).await;
        self.bus.publish(
            PipelineEvent::new(progress::EVENT_STORY_STARTED)
                .with_job(job_id)
                .with_payload(serde_json::json!({
                    "animal": animal.clone(),
                    "num_scenes": num_scenes,
                })),
        );

        match self.story_job_inner(job_id, &cancel, &animal, num_scenes).await {
            Ok((story, file_name)) => {
                tracing::info!(
                    job_id = %job_id,
                    story_id = %story.id,
                    file = %file_name,
                    "Story generated",
                );
                self.jobs.set_story(job_id, story.id).await;
                self.jobs
                    .complete(
                        job_id,
                        serde_json::json!({
                            "story_id": story.id,
                            "story_title": story.story_title.clone(),
                            "file_name": file_name,
                        }),
                    )
                    .await;
                self.bus.publish(
                    PipelineEvent::new(progress::EVENT_STORY_COMPLETED)
                        .with_story(story.id)
                        .with_job(job_id)
                        .with_payload(serde_json::json!({
                            "story_title": story.story_title,
                            "scenes": story.scenes.len(),
                        })),
                );
            }
            Err(PipelineError::Cancelled) => {
                self.finish_cancelled(job_id, None).await;
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "Story generation failed");
                self.jobs.fail(job_id, e.to_string()).await;
                self.bus.publish(
                    PipelineEvent::new(progress::EVENT_STORY_FAILED)
                        .with_job(job_id)
                        .with_payload(serde_json::json!({ "error": e.to_string() })),
                );
            }
        }
    }

    async fn story_job_inner(
        &self,
        job_id: JobId,
        cancel: &CancellationToken,
        animal: &str,
        num_scenes: u8,
    ) -> Result<(Story, String), PipelineError> {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        self.jobs
            .update_progress(
                job_id,
                progress::STORY_PERCENT_REQUESTING,
                "Generating story text",
            )
            .await;

        let mut draft = self
            .openai
            .generate_story_draft(&self.config.story_model, animal, num_scenes)
            .await?;
        story::validate_draft(&mut draft)?;

        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        self.jobs
            .update_progress(job_id, progress::STORY_PERCENT_SAVING, "Saving story")
            .await;

        let story = Story::from_draft(draft, animal);
        let file_name = self.store.save(&story).await?;
        Ok((story, file_name))
    }

    // -----------------------------------------------------------------
    // Video production
    // -----------------------------------------------------------------

    /// Spawn a video-production job for an existing story.
    ///
    /// The story is loaded up front so an unknown id fails synchronously
    /// with a not-found error instead of a doomed background job.
    pub async fn spawn_video_job(
        self: &Arc<Self>,
        story_id: StoryId,
        voice: Voice,
    ) -> Result<JobId, PipelineError> {
        let stored = self.store.load(story_id).await?;

        let (job_id, cancel) = self
            .jobs
            .create(JobKind::VideoProduction, Some(story_id))
            .await;
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            pipeline
                .run_video_job(job_id, cancel, stored.story, voice)
                .await;
        });
        Ok(job_id)
    }

    async fn run_video_job(
        &self,
        job_id: JobId,
        cancel: CancellationToken,
        story: Story,
        voice: Voice,
    ) {
        let story_id = story.id;
        self.jobs.mark_running(job_id).await;
        self.bus.publish(
            PipelineEvent::new(progress::EVENT_VIDEO_STARTED)
                .with_story(story_id)
                .with_job(job_id)
                .with_payload(serde_json::json!({
                    "story_title": story.story_title.clone(),
                    "scenes": story.scenes.len(),
                    "voice": voice.as_str(),
                })),
        );

        match self.video_job_inner(job_id, &cancel, story, voice).await {
            Ok((video_file, duration_secs)) => {
                tracing::info!(
                    job_id = %job_id,
                    story_id = %story_id,
                    video = %video_file,
                    duration_secs,
                    "Video rendered",
                );
                self.jobs
                    .complete(
                        job_id,
                        serde_json::json!({
                            "video_file": video_file.clone(),
                            "total_duration": duration_secs,
                        }),
                    )
                    .await;
                self.bus.publish(
                    PipelineEvent::new(progress::EVENT_VIDEO_COMPLETED)
                        .with_story(story_id)
                        .with_job(job_id)
                        .with_payload(serde_json::json!({
                            "video_file": video_file,
                            "total_duration": duration_secs,
                        })),
                );
            }
            Err(PipelineError::Cancelled) => {
                self.finish_cancelled(job_id, Some(story_id)).await;
            }
            Err(e) => {
                tracing::error!(
                    job_id = %job_id,
                    story_id = %story_id,
                    error = %e,
                    "Video production failed",
                );
                self.jobs.fail(job_id, e.to_string()).await;
                self.bus.publish(
                    PipelineEvent::new(progress::EVENT_VIDEO_FAILED)
                        .with_story(story_id)
                        .with_job(job_id)
                        .with_payload(serde_json::json!({ "error": e.to_string() })),
                );
            }
        }
    }

    async fn video_job_inner(
        &self,
        job_id: JobId,
        cancel: &CancellationToken,
        mut story: Story,
        voice: Voice,
    ) -> Result<(String, f64), PipelineError> {
        let assets_dir = self.store.layout().assets_dir(story.id);
        tokio::fs::create_dir_all(&assets_dir).await?;

        let total_scenes = story.scenes.len() as u32;
        let mut clip_paths: Vec<PathBuf> = Vec::with_capacity(story.scenes.len());

        for idx in 0..story.scenes.len() {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }

            let scene_number = story.scenes[idx].scene_number;

            // Still image.
            self.scene_progress(job_id, story.id, idx as u32, scene_number, total_scenes, ScenePhase::Image)
                .await;
            let image_bytes = self
                .openai
                .generate_image(&story.scenes[idx].image_prompt)
                .await?;
            let decoded = image::load_from_memory(&image_bytes)
                .map_err(|e| PipelineError::BadImage(e.to_string()))?;
            tracing::debug!(
                scene = scene_number,
                width = decoded.width(),
                height = decoded.height(),
                "Scene image decoded",
            );
            let image_name = naming::scene_image_filename(scene_number);
            let image_path = assets_dir.join(&image_name);
            tokio::fs::write(&image_path, &image_bytes).await?;
            story.scenes[idx].image_file = Some(image_name);

            // Narration audio.
            self.scene_progress(job_id, story.id, idx as u32, scene_number, total_scenes, ScenePhase::Audio)
                .await;
            let audio_bytes = self
                .openai
                .synthesize_speech(&story.scenes[idx].narration, voice)
                .await?;
            let audio_name = naming::scene_audio_filename(scene_number);
            let audio_path = assets_dir.join(&audio_name);
            tokio::fs::write(&audio_path, &audio_bytes).await?;
            story.scenes[idx].audio_file = Some(audio_name);

            // The narration length is the scene length.
            story.scenes[idx].duration = ffmpeg::media_duration_secs(&audio_path).await?;

            // Scene clip.
            self.scene_progress(job_id, story.id, idx as u32, scene_number, total_scenes, ScenePhase::Clip)
                .await;
            let clip_path = assets_dir.join(naming::scene_clip_filename(scene_number));
            ffmpeg::render_scene_clip(&image_path, &audio_path, &clip_path).await?;
            clip_paths.push(clip_path);
        }

        // All media exists; persist before the (interruptible) assembly
        // step so a crash here still leaves reusable assets on disk.
        story.status = StoryStatus::MediaReady;
        story.total_duration = story.scenes.iter().map(|s| s.duration).sum();
        self.store.save(&story).await?;

        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        self.jobs
            .update_progress(
                job_id,
                progress::VIDEO_PERCENT_ASSEMBLING,
                "Combining scenes into final video",
            )
            .await;
        self.bus.publish(
            PipelineEvent::new(progress::EVENT_VIDEO_ASSEMBLING)
                .with_story(story.id)
                .with_job(job_id)
                .with_payload(serde_json::json!({ "clips": clip_paths.len() })),
        );

        let video_name = naming::video_filename(&story.story_title);
        let video_path = self.store.layout().videos_dir().join(&video_name);
        let clip_refs: Vec<&std::path::Path> = clip_paths.iter().map(PathBuf::as_path).collect();
        ffmpeg::concat_clips(&clip_refs, &video_path).await?;

        let duration_secs = ffmpeg::media_duration_secs(&video_path).await?;

        story.status = StoryStatus::Rendered;
        story.video_file = Some(video_name.clone());
        story.total_duration = duration_secs;
        self.store.save(&story).await?;

        Ok((video_name, duration_secs))
    }

    // -----------------------------------------------------------------
    // Shared helpers
    // -----------------------------------------------------------------

    async fn scene_progress(
        &self,
        job_id: JobId,
        story_id: StoryId,
        scene_index: u32,
        scene_number: u32,
        total_scenes: u32,
        phase: ScenePhase,
    ) {
        let percent = progress::video_scene_percent(scene_index, total_scenes, phase);
        let stage = phase.stage_line(scene_number, total_scenes);
        self.jobs.update_progress(job_id, percent, &stage).await;
        self.bus.publish(
            PipelineEvent::new(progress::EVENT_VIDEO_SCENE_PROGRESS)
                .with_story(story_id)
                .with_job(job_id)
                .with_payload(serde_json::json!({
                    "scene": scene_number,
                    "total": total_scenes,
                    "percent": percent,
                    "stage": stage,
                })),
        );
    }

    async fn finish_cancelled(&self, job_id: JobId, story_id: Option<StoryId>) {
        tracing::info!(job_id = %job_id, "Job cancelled");
        self.jobs.mark_cancelled(job_id).await;
        let mut event = PipelineEvent::new(progress::EVENT_JOB_CANCELLED).with_job(job_id);
        if let Some(story_id) = story_id {
            event = event.with_story(story_id);
        }
        self.bus.publish(event);
    }
}

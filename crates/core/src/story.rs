//! Story and scene data model, narration voices, and input validators.
//!
//! The JSON shape of [`Story`] is the on-disk story file format: the
//! generative model is prompted to answer in exactly the [`StoryDraft`]
//! shape, and the store persists [`Story`] (draft plus platform metadata)
//! without any further mapping.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{StoryId, Timestamp};

// ---------------------------------------------------------------------------
// Scene count bounds
// ---------------------------------------------------------------------------

/// Minimum number of scenes per story.
pub const MIN_SCENES: u8 = 3;
/// Maximum number of scenes per story.
pub const MAX_SCENES: u8 = 15;
/// Default number of scenes when the request does not specify one.
pub const DEFAULT_SCENES: u8 = 8;

/// Maximum accepted length of an animal name, in characters.
pub const MAX_ANIMAL_NAME_CHARS: usize = 64;

// ---------------------------------------------------------------------------
// Voices
// ---------------------------------------------------------------------------

/// Narration voice for speech synthesis.
///
/// Mirrors the voices offered by the OpenAI `tts-1` model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    /// The wire name of the voice, as sent to the speech API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }
}

// ---------------------------------------------------------------------------
// Story status
// ---------------------------------------------------------------------------

/// Lifecycle of a story: generated text only, per-scene media produced,
/// final video rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    /// Narration text and image prompts exist; no media yet.
    #[default]
    Draft,
    /// Every scene has its image and audio asset.
    MediaReady,
    /// The final video file has been assembled.
    Rendered,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// One narrated, illustrated segment of a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position within the story.
    pub scene_number: u32,
    /// Narration text read aloud for this scene.
    pub narration: String,
    /// Visual description handed to the image generator.
    pub image_prompt: String,
    /// Scene duration in seconds. Initially the model's estimate;
    /// replaced with the probed narration audio duration after media
    /// production.
    pub duration: f64,
    /// Background-music tag suggested by the model (informational only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music: Option<String>,
    /// Relative path of the generated still image, once produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
    /// Relative path of the synthesized narration audio, once produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
}

impl Scene {
    /// Whether both media assets for this scene have been produced.
    pub fn has_media(&self) -> bool {
        self.image_file.is_some() && self.audio_file.is_some()
    }
}

// ---------------------------------------------------------------------------
// Story
// ---------------------------------------------------------------------------

/// The raw story shape returned by the text model, before the platform
/// attaches identity and lifecycle metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDraft {
    /// Title of the story.
    pub story_title: String,
    /// Ordered scenes.
    pub scenes: Vec<Scene>,
    /// Sum of scene durations in seconds, per the model's estimates.
    #[serde(default)]
    pub total_duration: f64,
}

/// A full generated narrative: an ordered sequence of scenes plus
/// platform metadata. Persisted as one JSON file per story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Unique story identifier.
    pub id: StoryId,
    /// The animal the story is about, as entered by the user.
    pub animal: String,
    /// Title of the story.
    pub story_title: String,
    /// Ordered scenes.
    pub scenes: Vec<Scene>,
    /// Total duration in seconds. Estimated until the video is rendered,
    /// then replaced with the probed duration of the final file.
    pub total_duration: f64,
    /// Lifecycle status.
    #[serde(default)]
    pub status: StoryStatus,
    /// When the story was generated (UTC).
    pub created_at: Timestamp,
    /// Filename of the rendered video, once one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_file: Option<String>,
}

impl Story {
    /// Assemble a [`Story`] from a validated draft.
    pub fn from_draft(draft: StoryDraft, animal: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            animal: animal.into(),
            story_title: draft.story_title,
            scenes: draft.scenes,
            total_duration: draft.total_duration,
            status: StoryStatus::Draft,
            created_at: chrono::Utc::now(),
            video_file: None,
        }
    }

    /// Whether every scene has both of its media assets.
    pub fn media_complete(&self) -> bool {
        !self.scenes.is_empty() && self.scenes.iter().all(Scene::has_media)
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate a user-entered animal name: non-empty after trimming and at
/// most [`MAX_ANIMAL_NAME_CHARS`] characters.
pub fn validate_animal_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Animal name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_ANIMAL_NAME_CHARS {
        return Err(CoreError::Validation(format!(
            "Animal name must be at most {MAX_ANIMAL_NAME_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate a requested scene count against [`MIN_SCENES`]..=[`MAX_SCENES`].
pub fn validate_scene_count(count: u8) -> Result<(), CoreError> {
    if (MIN_SCENES..=MAX_SCENES).contains(&count) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Scene count must be between {MIN_SCENES} and {MAX_SCENES}, got {count}"
        )))
    }
}

/// Validate a story draft returned by the text model.
///
/// Rejects drafts with no scenes, blank titles, or scenes missing
/// narration or an image prompt. Scene numbers are rewritten to a clean
/// 1-based sequence so downstream asset naming never collides.
pub fn validate_draft(draft: &mut StoryDraft) -> Result<(), CoreError> {
    if draft.story_title.trim().is_empty() {
        return Err(CoreError::Validation("Story draft has an empty title".into()));
    }
    if draft.scenes.is_empty() {
        return Err(CoreError::Validation("Story draft contains no scenes".into()));
    }

    for (idx, scene) in draft.scenes.iter_mut().enumerate() {
        let number = (idx + 1) as u32;
        if scene.narration.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Scene {number} has empty narration"
            )));
        }
        if scene.image_prompt.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Scene {number} has an empty image prompt"
            )));
        }
        scene.scene_number = number;
        if scene.duration <= 0.0 {
            scene.duration = 5.0;
        }
    }

    if draft.total_duration <= 0.0 {
        draft.total_duration = draft.scenes.iter().map(|s| s.duration).sum();
    }

    Ok(())
}

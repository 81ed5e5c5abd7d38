//! Event names and percent-complete mapping for pipeline jobs.

// ---------------------------------------------------------------------------
// Event type constants
// ---------------------------------------------------------------------------

pub const EVENT_STORY_STARTED: &str = "story.started";
pub const EVENT_STORY_COMPLETED: &str = "story.completed";
pub const EVENT_STORY_FAILED: &str = "story.failed";

pub const EVENT_VIDEO_STARTED: &str = "video.started";
pub const EVENT_VIDEO_SCENE_PROGRESS: &str = "video.scene_progress";
pub const EVENT_VIDEO_ASSEMBLING: &str = "video.assembling";
pub const EVENT_VIDEO_COMPLETED: &str = "video.completed";
pub const EVENT_VIDEO_FAILED: &str = "video.failed";

pub const EVENT_JOB_CANCELLED: &str = "job.cancelled";

// ---------------------------------------------------------------------------
// Story job percents
// ---------------------------------------------------------------------------

/// Story job: request sent to the text model.
pub const STORY_PERCENT_REQUESTING: u8 = 25;
/// Story job: draft validated, saving to disk.
pub const STORY_PERCENT_SAVING: u8 = 75;

// ---------------------------------------------------------------------------
// Video job percents
// ---------------------------------------------------------------------------

/// Portion of a video job spent on per-scene media, in percent.
const SCENE_WORK_PERCENT: f64 = 90.0;
/// Percent reported while concatenating clips.
pub const VIDEO_PERCENT_ASSEMBLING: u8 = 95;

/// Per-scene production phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Generating the still image.
    Image,
    /// Synthesizing narration audio.
    Audio,
    /// Rendering the scene clip.
    Clip,
}

impl ScenePhase {
    fn ordinal(self) -> u32 {
        match self {
            ScenePhase::Image => 0,
            ScenePhase::Audio => 1,
            ScenePhase::Clip => 2,
        }
    }

    /// Stage line shown to the user, e.g. `"Scene 3/8: rendering clip"`.
    pub fn stage_line(self, scene_number: u32, total_scenes: u32) -> String {
        let verb = match self {
            ScenePhase::Image => "generating image",
            ScenePhase::Audio => "synthesizing narration",
            ScenePhase::Clip => "rendering clip",
        };
        format!("Scene {scene_number}/{total_scenes}: {verb}")
    }
}

/// Percent complete for a video job working on the given scene and phase.
///
/// Scene work fills 0..=90 evenly across `total_scenes * 3` phases;
/// assembly and finalization take the rest. `scene_index` is 0-based.
pub fn video_scene_percent(scene_index: u32, total_scenes: u32, phase: ScenePhase) -> u8 {
    if total_scenes == 0 {
        return 0;
    }
    let total_phases = (total_scenes * 3) as f64;
    let done_phases = (scene_index * 3 + phase.ordinal()) as f64;
    (done_phases / total_phases * SCENE_WORK_PERCENT).round() as u8
}

//! On-disk layout of the output directory.
//!
//! ```text
//! {root}/
//!   stories/                 one JSON file per story
//!   assets/{story_id}/       scene_{n}.png, scene_{n}.mp3, scene_{n}.mp4
//!   videos/                  rendered final videos
//! ```

use std::path::{Path, PathBuf};

use wildtale_core::types::StoryId;

use crate::error::StoreError;

/// Resolved directory layout under a configurable output root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Create a layout rooted at `root`. No directories are created;
    /// call [`ensure`](Self::ensure) for that.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding story JSON files.
    pub fn stories_dir(&self) -> PathBuf {
        self.root.join("stories")
    }

    /// Per-story directory holding scene images, audio, and clips.
    pub fn assets_dir(&self, story_id: StoryId) -> PathBuf {
        self.root.join("assets").join(story_id.to_string())
    }

    /// Directory holding rendered final videos.
    pub fn videos_dir(&self) -> PathBuf {
        self.root.join("videos")
    }

    /// Create the stories and videos directories (assets directories are
    /// created per story when media production starts).
    pub async fn ensure(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(self.stories_dir()).await?;
        tokio::fs::create_dir_all(self.videos_dir()).await?;
        Ok(())
    }
}

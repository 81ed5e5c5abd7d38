//! The JSON-file story store.
//!
//! Stories are saved as `{animal_slug}_{timestamp}.json` under the
//! stories directory. Lookups scan that directory; at the scale of this
//! tool (one user, tens of stories) a scan beats maintaining an index.

use std::path::PathBuf;

use wildtale_core::naming;
use wildtale_core::story::Story;
use wildtale_core::types::StoryId;

use crate::error::StoreError;
use crate::layout::OutputLayout;

/// A story together with the filename it lives in.
#[derive(Debug, Clone)]
pub struct StoredStory {
    pub story: Story,
    pub file_name: String,
}

/// A rendered video file in the videos directory.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VideoEntry {
    pub file_name: String,
    pub size_bytes: u64,
}

/// Filesystem-backed store for stories, scene assets, and videos.
#[derive(Debug, Clone)]
pub struct StoryStore {
    layout: OutputLayout,
}

impl StoryStore {
    /// Create a store over the given layout.
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    /// The underlying directory layout.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    // -- stories ----------------------------------------------------------

    /// Persist a story as JSON, returning its filename.
    ///
    /// The filename is derived from the animal and creation timestamp, so
    /// re-saving an updated story overwrites the same file. Writes go to
    /// a temp file first and are renamed into place, so readers never see
    /// a half-written story.
    pub async fn save(&self, story: &Story) -> Result<String, StoreError> {
        let file_name = naming::story_filename(&story.animal, story.created_at);
        let path = self.layout.stories_dir().join(&file_name);
        let tmp_path = path.with_extension("json.tmp");

        let body = serde_json::to_vec_pretty(story)?;
        tokio::fs::write(&tmp_path, body).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::debug!(story_id = %story.id, file = %file_name, "Story saved");
        Ok(file_name)
    }

    /// Load a story by id.
    pub async fn load(&self, id: StoryId) -> Result<StoredStory, StoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|s| s.story.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// List all stories, newest first.
    ///
    /// Files that fail to parse are skipped with a warning rather than
    /// failing the whole listing.
    pub async fn list(&self) -> Result<Vec<StoredStory>, StoreError> {
        let dir = self.layout.stories_dir();
        let mut stories = Vec::new();

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(stories),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();

            let body = tokio::fs::read(&path).await?;
            match serde_json::from_slice::<Story>(&body) {
                Ok(story) => stories.push(StoredStory { story, file_name }),
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "Skipping unparsable story file");
                }
            }
        }

        stories.sort_by(|a, b| b.story.created_at.cmp(&a.story.created_at));
        Ok(stories)
    }

    /// Delete a story: its JSON file, its asset directory, and its
    /// rendered video if one exists.
    pub async fn delete(&self, id: StoryId) -> Result<(), StoreError> {
        let stored = self.load(id).await?;

        tokio::fs::remove_file(self.layout.stories_dir().join(&stored.file_name)).await?;

        let assets = self.layout.assets_dir(id);
        if assets.is_dir() {
            tokio::fs::remove_dir_all(&assets).await?;
        }

        if let Some(video) = &stored.story.video_file {
            let video_path = self.layout.videos_dir().join(video);
            if video_path.is_file() {
                tokio::fs::remove_file(&video_path).await?;
            }
        }

        tracing::info!(story_id = %id, "Story deleted");
        Ok(())
    }

    /// Raw JSON bytes of a story file, for download endpoints.
    pub async fn read_story_bytes(&self, id: StoryId) -> Result<(String, Vec<u8>), StoreError> {
        let stored = self.load(id).await?;
        let path = self.layout.stories_dir().join(&stored.file_name);
        let body = tokio::fs::read(&path).await?;
        Ok((stored.file_name, body))
    }

    // -- videos -----------------------------------------------------------

    /// Resolve a video filename to its full path, rejecting anything that
    /// could escape the videos directory.
    pub fn video_path(&self, file_name: &str) -> Result<PathBuf, StoreError> {
        if !is_safe_file_name(file_name) {
            return Err(StoreError::FileNotFound(file_name.to_string()));
        }
        Ok(self.layout.videos_dir().join(file_name))
    }

    /// List rendered videos with their sizes, sorted by filename.
    pub async fn list_videos(&self) -> Result<Vec<VideoEntry>, StoreError> {
        let dir = self.layout.videos_dir();
        let mut videos = Vec::new();

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(videos),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("mp4") {
                continue;
            }
            let meta = entry.metadata().await?;
            videos.push(VideoEntry {
                file_name: entry.file_name().to_string_lossy().to_string(),
                size_bytes: meta.len(),
            });
        }

        videos.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(videos)
    }
}

/// A filename is safe when it is a single path component: no separators,
/// no parent references, not empty.
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && name != "."
        && name != ".."
        && !name.contains("..")
}

use wildtale_core::types::StoryId;

/// Errors from the JSON-file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem-level failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A story file could not be serialized or parsed.
    #[error("Story serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// No story file with the given id exists.
    #[error("Story {0} not found")]
    NotFound(StoryId),

    /// A referenced media file (asset or video) does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),
}

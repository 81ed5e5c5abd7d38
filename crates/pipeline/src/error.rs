use wildtale_core::error::CoreError;
use wildtale_core::ffmpeg::FfmpegError;
use wildtale_openai::OpenAiError;
use wildtale_store::StoreError;

/// Errors from pipeline execution.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A domain-level error (validation, not-found).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The OpenAI API call failed.
    #[error("Generation failed: {0}")]
    OpenAi(#[from] OpenAiError),

    /// The story store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Video rendering failed.
    #[error("Video assembly failed: {0}")]
    Ffmpeg(#[from] FfmpegError),

    /// Writing a media asset to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generated image could not be decoded.
    #[error("Generated image is not a decodable image: {0}")]
    BadImage(String),

    /// The job was cancelled between scenes.
    #[error("Job cancelled")]
    Cancelled,
}

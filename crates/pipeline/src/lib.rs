//! Generation pipeline: story text, per-scene media, video assembly.
//!
//! - [`jobs`] — in-memory job registry with cooperative cancellation.
//! - [`progress`] — event names and percent-complete mapping.
//! - [`runner`] — the [`Pipeline`](runner::Pipeline) orchestrator that
//!   drives the OpenAI client, the store, and ffmpeg.

pub mod error;
pub mod jobs;
pub mod progress;
pub mod runner;

pub use error::PipelineError;
pub use jobs::{Job, JobKind, JobRegistry, JobStatus};
pub use runner::{Pipeline, PipelineConfig};

//! Domain types and shared utilities for the wildtale platform.
//!
//! - [`story`] — stories, scenes, voices, and their validators.
//! - [`naming`] — deterministic filename conventions for stories, scene
//!   assets, and rendered videos.
//! - [`ffmpeg`] — ffmpeg/ffprobe command utilities used by video assembly.
//! - [`error`] — the shared [`CoreError`](error::CoreError) type.

pub mod error;
pub mod ffmpeg;
pub mod naming;
pub mod story;
pub mod types;

pub use error::CoreError;

//! In-process event bus for pipeline progress.
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PipelineEvent`] — the canonical progress event envelope, pushed
//!   to WebSocket clients by the API layer.

pub mod bus;

pub use bus::{EventBus, PipelineEvent};

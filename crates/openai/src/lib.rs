//! REST client for the OpenAI API surfaces the pipeline uses.
//!
//! - [`chat`] — chat completions, producing structured story drafts.
//! - [`images`] — image generation for scene illustrations.
//! - [`speech`] — text-to-speech for scene narration.
//! - [`prompts`] — the story, image, and system prompt templates.
//!
//! All requests go through one [`OpenAiClient`] holding a shared
//! [`reqwest::Client`].

pub mod chat;
pub mod client;
pub mod error;
pub mod images;
pub mod prompts;
pub mod speech;

pub use client::OpenAiClient;
pub use error::OpenAiError;

//! Chat-completions endpoint: structured story generation.
//!
//! The model is asked for a JSON answer in the [`StoryDraft`] shape.
//! Models occasionally wrap JSON answers in markdown code fences, so the
//! content is unfenced before parsing.

use serde::Deserialize;
use wildtale_core::story::StoryDraft;

use crate::client::OpenAiClient;
use crate::error::OpenAiError;
use crate::prompts;

/// Sampling temperature for story generation.
const STORY_TEMPERATURE: f64 = 0.7;

/// Token ceiling for a story response.
const STORY_MAX_TOKENS: u32 = 4096;

/// Response from `POST /chat/completions`, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub content: String,
}

impl OpenAiClient {
    /// Generate a story draft about `animal` with `num_scenes` scenes.
    ///
    /// Sends a `POST /chat/completions` request with the storyteller
    /// system prompt and parses the model's JSON answer into a
    /// [`StoryDraft`]. The caller validates the draft.
    pub async fn generate_story_draft(
        &self,
        model: &str,
        animal: &str,
        num_scenes: u8,
    ) -> Result<StoryDraft, OpenAiError> {
        let body = serde_json::json!({
            "model": model,
            "messages": [
                { "role": "system", "content": prompts::STORY_SYSTEM_PROMPT },
                { "role": "user", "content": prompts::story_user_prompt(animal, num_scenes) },
            ],
            "temperature": STORY_TEMPERATURE,
            "max_tokens": STORY_MAX_TOKENS,
        });

        tracing::debug!(model, animal, num_scenes, "Requesting story draft");

        let response = self.post_json("/chat/completions", &body).await?;
        let parsed: ChatResponse = Self::parse_response(response).await?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                OpenAiError::MalformedResponse("Chat response contained no choices".into())
            })?;

        let unfenced = strip_code_fences(content);
        serde_json::from_str::<StoryDraft>(unfenced).map_err(|e| {
            OpenAiError::MalformedResponse(format!("Story draft is not valid JSON: {e}"))
        })
    }
}

/// Strip a leading/trailing markdown code fence (```` ```json ... ``` ````)
/// from a model answer, if present.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.strip_suffix("```").map(str::trim).unwrap_or(trimmed)
}

//! Text-to-speech endpoint: narration audio per scene.

use wildtale_core::story::Voice;

use crate::client::OpenAiClient;
use crate::error::OpenAiError;

/// Speech model used for narration.
pub const SPEECH_MODEL: &str = "tts-1";

impl OpenAiClient {
    /// Synthesize narration audio for `text` with the given voice.
    ///
    /// Sends a `POST /audio/speech` request; the response body is the
    /// MP3 audio itself rather than JSON.
    pub async fn synthesize_speech(
        &self,
        text: &str,
        voice: Voice,
    ) -> Result<Vec<u8>, OpenAiError> {
        let body = serde_json::json!({
            "model": SPEECH_MODEL,
            "voice": voice.as_str(),
            "input": text,
        });

        tracing::debug!(voice = voice.as_str(), chars = text.len(), "Synthesizing narration");

        let response = self.post_json("/audio/speech", &body).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(OpenAiError::MalformedResponse(
                "Speech response body was empty".into(),
            ));
        }
        Ok(bytes.to_vec())
    }
}

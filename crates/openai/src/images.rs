//! Image-generation endpoint: one illustration per scene.

use serde::Deserialize;

use crate::client::OpenAiClient;
use crate::error::OpenAiError;
use crate::prompts;

/// Image model used for scene illustrations.
pub const IMAGE_MODEL: &str = "dall-e-3";

/// Generated image dimensions.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Response from `POST /images/generations`.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    pub data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
pub struct ImageDatum {
    /// URL of the generated image, valid for a short time.
    pub url: Option<String>,
}

impl OpenAiClient {
    /// Generate a scene illustration and return the raw image bytes.
    ///
    /// Sends a `POST /images/generations` request with the enhanced
    /// prompt, then downloads the returned URL. The URL expires quickly,
    /// so download happens immediately rather than being handed upward.
    pub async fn generate_image(&self, scene_prompt: &str) -> Result<Vec<u8>, OpenAiError> {
        let body = serde_json::json!({
            "model": IMAGE_MODEL,
            "prompt": prompts::enhance_image_prompt(scene_prompt),
            "size": IMAGE_SIZE,
            "quality": "standard",
            "n": 1,
        });

        let response = self.post_json("/images/generations", &body).await?;
        let parsed: ImageResponse = Self::parse_response(response).await?;

        let url = parsed
            .data
            .first()
            .and_then(|d| d.url.as_deref())
            .ok_or_else(|| {
                OpenAiError::MalformedResponse("Image response contained no URL".into())
            })?;

        tracing::debug!(url, "Downloading generated image");
        let image = self.get_absolute(url).await?;
        Ok(image.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_response_parses() {
        let json = r#"{"created": 1, "data": [{"url": "https://example.com/i.png"}]}"#;
        let parsed: ImageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.data[0].url.as_deref(),
            Some("https://example.com/i.png")
        );
    }

    #[test]
    fn image_response_without_url_parses_to_none() {
        let json = r#"{"data": [{"b64_json": "aGk="}]}"#;
        let parsed: ImageResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.data[0].url.is_none());
    }
}

//! The shared HTTP client for all OpenAI API calls.

use crate::error::OpenAiError;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model for story generation.
pub const DEFAULT_STORY_MODEL: &str = "gpt-4o-mini";

/// HTTP client for the OpenAI REST API.
///
/// Cheap to clone is not a goal; wrap it in `Arc` and share it. The base
/// URL is overridable so tests can point the client at a local stub.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client with an explicit API key and base URL.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from `OPENAI_API_KEY` and (optionally)
    /// `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, OpenAiError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(OpenAiError::MissingApiKey)?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(api_key, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling with other callers).
    pub fn with_client(http: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- request plumbing shared by the endpoint modules ----

    /// `POST {base_url}{path}` with a JSON body and bearer auth.
    pub(crate) async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, OpenAiError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    /// Plain GET of an absolute URL (asset downloads do not go through
    /// the API base and carry no auth header).
    pub(crate) async fn get_absolute(&self, url: &str) -> Result<reqwest::Response, OpenAiError> {
        let response = self.http.get(url).send().await?;
        Self::ensure_success(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`OpenAiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, OpenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OpenAiError> {
        Ok(response.json::<T>().await?)
    }
}

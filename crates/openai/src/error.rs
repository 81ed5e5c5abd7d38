/// Errors from the OpenAI REST client.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    /// The `OPENAI_API_KEY` environment variable is missing or empty.
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("OpenAI API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response arrived but did not have the expected shape.
    #[error("Malformed OpenAI response: {0}")]
    MalformedResponse(String),
}

/// Errors from a single SVG generation call.
///
/// Each failure mode of the upstream call has its own variant so callers
/// can tell a configuration problem from a provider outage.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No API key configured. Raised before any request is sent.
    #[error("OPENROUTER_API_KEY environment variable is not set")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider returned a non-200 status code.
    #[error("OpenRouter API returned status {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Failed to parse response: {reason}")]
    Decode { reason: String, body: String },

    /// The provider answered 200 but reported an error object.
    #[error("OpenRouter API error: {message}")]
    Remote { message: String },

    /// The response contained no choices.
    #[error("No response from OpenRouter API")]
    NoChoices,

    /// The first choice carried no content once code fences were removed.
    /// Reasoning models do this when they spend `max_tokens` before
    /// answering.
    #[error("OpenRouter API returned an empty completion")]
    EmptyContent,
}

impl GenerationError {
    /// Provider-supplied detail worth showing to the caller, if any.
    pub fn upstream_detail(&self) -> Option<&str> {
        match self {
            GenerationError::Api { body, .. } => Some(body),
            GenerationError::Remote { message } => Some(message),
            _ => None,
        }
    }
}

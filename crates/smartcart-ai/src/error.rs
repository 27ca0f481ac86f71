//! AI proxy error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    /// A required request field was empty or missing.
    #[error("{0}")]
    MissingField(String),

    /// The service is not configured (no API key).
    #[error("AI service is not configured")]
    NotConfigured,

    /// Network or HTTP failure talking to the completion service.
    #[error("AI service error: {0}")]
    Transport(String),

    /// The completion service answered with a non-success status.
    #[error("AI service returned status {status}")]
    UpstreamStatus { status: u16 },

    /// The completion response had no usable content.
    #[error("AI service returned an empty response")]
    EmptyCompletion,
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::Transport(err.to_string())
    }
}

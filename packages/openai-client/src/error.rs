//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Missing API key or invalid client settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the API
    #[error("OpenAI API Error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// The API answered without any choices
    #[error("No response from OpenAI")]
    EmptyResponse,
}

impl OpenAIError {
    /// Whether the failure happened before a response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, OpenAIError::Network(_))
    }
}

//! Error types for the code analyzer

use thiserror::Error;

/// Result type for code analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for code analyzer operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error, e.g. while binding the listener
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A remote API returned a non-success response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Response body as returned by the remote
        message: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Please retry after {retry_after_secs} seconds")]
    RateLimit {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// The repository reference could not be parsed
    #[error("Invalid repository reference: {0}")]
    InvalidRepository(String),

    /// File content could not be decoded from its transport encoding
    #[error("Decode error: {0}")]
    Decode(String),

    /// The assembled prompt exceeds the configured limit
    #[error("Prompt is {size} bytes, exceeding the limit of {limit} bytes")]
    PromptTooLarge {
        /// Size of the assembled prompt in bytes
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the remote reported that the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status_code: 404, .. })
    }

    /// The response body the remote attached to a failure, if any
    pub fn remote_body(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

//! Error types for the assistant.

use thiserror::Error;

/// Primary error type for all assistant operations.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("{0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },
}

impl AssistantError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether the error comes from the model endpoint rejecting credentials.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Authentication(_) => true,
            Self::Api { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AssistantError>;

//! API error types.

use serde::Deserialize;

/// Errors returned by the running room API client.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response (connect, timeout, I/O)
    Transport(String),
    /// Server answered with a non-2xx status
    Server {
        status: u16,
        message: Option<String>,
    },
    /// Response body did not match the expected shape
    Decode(String),
    /// A local check failed before any request was made
    Precondition(String),
}

impl ApiError {
    /// Text for the error banner.
    ///
    /// The server's own `message` is shown verbatim when it sent one, and
    /// local precondition failures show their own text. Everything else
    /// shows `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Precondition(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Network error: {}", e),
            ApiError::Server {
                status,
                message: Some(message),
            } => write!(f, "Server returned status {}: {}", status, message),
            ApiError::Server {
                status,
                message: None,
            } => write!(f, "Server returned status {}", status),
            ApiError::Decode(e) => write!(f, "Invalid response from server: {}", e),
            ApiError::Precondition(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Body the server attaches to error responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

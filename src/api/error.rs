//! API error taxonomy.

use thiserror::Error;

/// Message used when a failure body carries no usable `message` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "request failed";

/// Failure of one HTTP call against the gym management API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response reached us (DNS, refused connection, closed socket).
    #[error("network error: {0}")]
    Network(String),

    /// The configured request timeout elapsed.
    #[error("network error: request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// An authenticated call was attempted with no stored credential.
    /// Raised client-side, before any transport.
    #[error("no active session")]
    NoSession,

    /// A success response did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status code, when the server actually responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. } | Self::NoSession)
    }
}

/// Classify a transport-level failure from reqwest.
pub(crate) fn from_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

/// Pull the display message out of a failure body.
///
/// The backend answers errors as `{"message": "..."}`, but not reliably;
/// anything that is not JSON with a string `message` falls back to the
/// generic text instead of failing the error path itself.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

// ── Tests ──────────────────────────────────────────────────────

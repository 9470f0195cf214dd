//! Crate-wide error type for user-initiated operations.

use thiserror::Error;

use crate::api::ApiError;

/// Outcome of a user action (login, load, mutation).
///
/// `Validation` is resolved entirely client-side, before any transport;
/// everything the server or the network produces arrives as `Api`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Validation(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status of the underlying failure, when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status(),
            Self::Validation(_) => None,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(validation_message(&errors))
    }
}

/// Flatten field-level validation errors into one display line.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{:?}", e.code));
                format!("{}: {}", field, msg)
            })
        })
        .collect();

    if field_errors.is_empty() {
        "validation failed".to_string()
    } else {
        field_errors.join("; ")
    }
}

// ── Tests ──────────────────────────────────────────────────────

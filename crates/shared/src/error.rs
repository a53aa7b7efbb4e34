//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-supplied input is out of bounds.
    #[error("Validation error: {message}")]
    Validation {
        /// Offending request field.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },

    /// The upstream accounting API failed or returned an unusable payload.
    #[error("{message}")]
    ExternalService {
        /// Error-kind label reported to the caller.
        kind: &'static str,
        /// Human-readable reason.
        message: String,
    },
}

impl AppError {
    /// Creates a validation error for a request field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates an external service error with its kind label.
    #[must_use]
    pub fn external(kind: &'static str, message: impl Into<String>) -> Self {
        Self::ExternalService {
            kind,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 422,
            Self::ExternalService { .. } => 500,
        }
    }

    /// Returns the error-kind label used in the `type` field of error bodies.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::ExternalService { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

//! Report pipeline error types.

use moneyview_shared::AppError;
use thiserror::Error;

/// Errors that can occur while producing a balance sheet.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A single upstream call failed at the transport or HTTP layer.
    #[error("Upstream request failed: {0}")]
    UpstreamTransport(String),

    /// Every allowed attempt failed.
    #[error("Failed to fetch balance sheet after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made.
        attempts: u32,
        /// Message of the final failure.
        last: String,
    },

    /// The upstream payload does not match the report shape.
    #[error("Invalid response format: {0}")]
    UpstreamSchema(String),
}

impl ReportError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::UpstreamTransport(msg.into())
    }

    /// Creates a schema error.
    #[must_use]
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::UpstreamSchema(msg.into())
    }

    /// Whether another attempt may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamTransport(_))
    }

    /// Error-kind label reported to callers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamTransport(_) => "UpstreamTransportError",
            Self::RetriesExhausted { .. } => "RetriesExhaustedError",
            Self::UpstreamSchema(_) => "UpstreamSchemaError",
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::external(err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_display() {
        assert_eq!(
            ReportError::transport("connection refused").to_string(),
            "Upstream request failed: connection refused"
        );
        assert_eq!(
            ReportError::RetriesExhausted {
                attempts: 3,
                last: "Upstream request failed: timed out".into()
            }
            .to_string(),
            "Failed to fetch balance sheet after 3 attempts: Upstream request failed: timed out"
        );
        assert_eq!(
            ReportError::schema("missing field `Reports`").to_string(),
            "Invalid response format: missing field `Reports`"
        );
    }

    #[test]
    fn test_only_transport_errors_are_retryable() {
        assert!(ReportError::transport("x").is_retryable());
        assert!(!ReportError::schema("x").is_retryable());
        assert!(
            !ReportError::RetriesExhausted {
                attempts: 3,
                last: "x".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_into_app_error_keeps_kind_and_message() {
        let app: AppError = ReportError::schema("bad").into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.kind(), "UpstreamSchemaError");
        assert_eq!(app.to_string(), "Invalid response format: bad");
    }
}

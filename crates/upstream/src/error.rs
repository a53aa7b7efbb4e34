//! Upstream client error types.

use moneyview_core::reports::ReportError;
use thiserror::Error;

/// Errors raised by the upstream HTTP client.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The HTTP client could not be built.
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed or returned a non-success status.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("response body is not valid JSON: {0}")]
    Body(#[source] reqwest::Error),
}

impl From<UpstreamError> for ReportError {
    fn from(err: UpstreamError) -> Self {
        Self::transport(err.to_string())
    }
}

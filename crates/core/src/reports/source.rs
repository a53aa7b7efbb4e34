//! Upstream report source abstraction.

use async_trait::async_trait;
use moneyview_shared::types::PageRequest;
use serde_json::Value;

use super::error::ReportError;

/// Fetches the raw balance sheet JSON from the upstream accounting API.
///
/// Implementations make exactly one call per invocation; retrying is the
/// caller's job.
#[async_trait]
pub trait BalanceSheetSource: Send + Sync {
    /// Fetches one balance sheet document.
    ///
    /// Transport failures, non-success statuses and non-JSON bodies are
    /// reported as [`ReportError::UpstreamTransport`].
    async fn fetch_balance_sheet(&self, request: &PageRequest) -> Result<Value, ReportError>;
}

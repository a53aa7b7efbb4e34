//! Balance sheet client.

use async_trait::async_trait;
use moneyview_core::reports::{BalanceSheetSource, ReportError};
use moneyview_shared::UpstreamConfig;
use moneyview_shared::types::PageRequest;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::UpstreamError;

/// Path of the balance sheet report below the base URL.
pub const BALANCE_SHEET_PATH: &str = "/api.xro/2.0/Reports/BalanceSheet";

/// Client for the upstream accounting API.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections across concurrent requests.
#[derive(Debug)]
pub struct XeroClient {
    client: Client,
    balance_sheet_url: String,
}

impl XeroClient {
    /// Opens the client described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn connect(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Wraps an existing client (for testing).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        let balance_sheet_url = format!("{}{BALANCE_SHEET_PATH}", base_url.trim_end_matches('/'));
        info!(url = %balance_sheet_url, "Upstream client ready");
        Self {
            client,
            balance_sheet_url,
        }
    }

    /// Full URL of the balance sheet report.
    pub fn balance_sheet_url(&self) -> &str {
        &self.balance_sheet_url
    }

    /// Closes the client, dropping pooled connections.
    pub fn close(self) {
        info!(url = %self.balance_sheet_url, "Closing upstream client");
    }

    async fn get_balance_sheet(&self, request: &PageRequest) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(&self.balance_sheet_url)
            .query(&[("page", request.page), ("pageSize", request.page_size)])
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Upstream responded");

        response
            .error_for_status()?
            .json::<Value>()
            .await
            .map_err(UpstreamError::Body)
    }
}

#[async_trait]
impl BalanceSheetSource for XeroClient {
    async fn fetch_balance_sheet(&self, request: &PageRequest) -> Result<Value, ReportError> {
        Ok(self.get_balance_sheet(request).await?)
    }
}

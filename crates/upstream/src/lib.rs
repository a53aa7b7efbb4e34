//! HTTP client for the upstream accounting API.
//!
//! [`XeroClient`] owns a single pooled `reqwest::Client`, created once at
//! startup, and implements [`moneyview_core::reports::BalanceSheetSource`].

mod client;
mod error;

pub use client::{BALANCE_SHEET_PATH, XeroClient};
pub use error::UpstreamError;

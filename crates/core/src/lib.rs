//! Core report logic for MoneyView.
//!
//! This crate contains the balance sheet pipeline with ZERO web or HTTP-client
//! dependencies. The upstream fetch is reached through the
//! [`reports::BalanceSheetSource`] trait.
//!
//! # Modules
//!
//! - `reports` - Report model, flattening, assembly and the balance sheet service
//! - `retry` - Bounded retry policy with an injectable sleeper

pub mod reports;
pub mod retry;

//! Shared types, errors, and configuration for MoneyView.
//!
//! This crate provides common types used across all other crates:
//! - Pagination types and the page slicing used by list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ReportConfig, ServerConfig, UpstreamConfig};
pub use error::AppError;

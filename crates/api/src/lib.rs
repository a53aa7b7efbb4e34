//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The balance sheet route
//! - Health and welcome routes
//! - Mapping of application errors to HTTP responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use moneyview_core::reports::BalanceSheetService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Balance sheet pipeline, shared by every request.
    pub balance_sheet: Arc<BalanceSheetService>,
}

impl AppState {
    /// Creates the state around an already-built service.
    pub fn new(balance_sheet: BalanceSheetService) -> Self {
        Self {
            balance_sheet: Arc::new(balance_sheet),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

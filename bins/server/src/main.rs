//! MoneyView API Server
//!
//! Main entry point for the balance sheet proxy.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moneyview_api::{AppState, create_router};
use moneyview_core::reports::{BalanceSheetService, DisplayZone};
use moneyview_core::retry::RetryPolicy;
use moneyview_shared::AppConfig;
use moneyview_upstream::XeroClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moneyview=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    let zone = DisplayZone::from_config(config.report.parsed_timezone()?);

    // Open the upstream client
    let client = Arc::new(XeroClient::connect(&config.upstream)?);
    info!(
        max_attempts = config.upstream.max_attempts,
        retry_delay_secs = config.upstream.retry_delay_secs,
        "Upstream client opened"
    );

    // Create application state
    let policy = RetryPolicy::new(config.upstream.max_attempts, config.upstream.retry_delay());
    let state = AppState::new(BalanceSheetService::new(client.clone(), policy, zone));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and its clone of the client) is gone once serve returns.
    match Arc::try_unwrap(client) {
        Ok(client) => client.close(),
        Err(_) => info!("Upstream client still referenced at shutdown"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

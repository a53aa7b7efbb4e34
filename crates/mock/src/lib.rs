//! Mock upstream accounting API.
//!
//! Serves a fixed balance sheet at the same path as the real API so the proxy
//! can run locally and in tests without credentials.

use std::io;
use std::net::SocketAddr;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::error;

/// Line items generated inside each section of the mock balance sheet.
pub const ROWS_PER_SECTION: u64 = 20;

/// Path of the balance sheet report.
pub const BALANCE_SHEET_PATH: &str = "/api.xro/2.0/Reports/BalanceSheet";

/// Formats whole dollars with thousands separators, e.g. `$10,000`.
fn dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// Builds `count` plain rows named "Test Account N".
pub fn test_rows(count: u64) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let name = format!("Test Account {}", i + 1);
            json!({
                "RowType": "Row",
                "Title": name,
                "Cells": [
                    {"Value": name},
                    {"Value": dollars(10_000 + i * 1_000)},
                    {"Value": dollars(9_000 + i * 1_000)},
                    {"Value": dollars(1_000 + i * 100)},
                ],
                "Rows": null,
            })
        })
        .collect()
}

fn cells(values: [&str; 4]) -> Value {
    Value::Array(values.iter().map(|v| json!({ "Value": v })).collect())
}

/// The mock balance sheet: a header, two sections of test rows and a summary.
pub fn balance_sheet() -> Value {
    json!({
        "Reports": [{
            "ReportID": "BalanceSheet",
            "ReportName": "Balance Sheet",
            "ReportType": "BalanceSheet",
            "ReportTitles": ["Balance Sheet"],
            "ReportDate": "2024-03-24",
            "UpdatedDateUTC": "2024-03-24T00:00:00",
            "Rows": [
                {
                    "RowType": "Header",
                    "Title": "Header",
                    "Cells": cells(["Account", "Current", "Previous", "Change"]),
                    "Rows": null,
                },
                {
                    "RowType": "Section",
                    "Title": "Assets",
                    "Cells": cells(["Assets", "$1,000,000", "$900,000", "$100,000"]),
                    "Rows": test_rows(ROWS_PER_SECTION),
                },
                {
                    "RowType": "Section",
                    "Title": "Liabilities",
                    "Cells": cells(["Liabilities", "$800,000", "$750,000", "$50,000"]),
                    "Rows": test_rows(ROWS_PER_SECTION),
                },
                {
                    "RowType": "SummaryRow",
                    "Title": "Net Assets",
                    "Cells": cells(["Net Assets", "$200,000", "$150,000", "$50,000"]),
                    "Rows": null,
                },
            ],
        }],
    })
}

/// Rows in the mock balance sheet once flattened.
pub const fn flattened_row_count() -> u64 {
    // header + 2 * (section + children) + summary
    1 + 2 * (1 + ROWS_PER_SECTION) + 1
}

async fn get_balance_sheet() -> Json<Value> {
    Json(balance_sheet())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Creates the mock API router.
pub fn create_router() -> Router {
    Router::new()
        .route(BALANCE_SHEET_PATH, get(get_balance_sheet))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
}

/// Serves `router` on an ephemeral localhost port.
///
/// # Errors
///
/// Returns an error if no local port can be bound.
pub async fn serve_ephemeral(router: Router) -> io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "Mock upstream stopped");
        }
    });
    Ok((addr, handle))
}

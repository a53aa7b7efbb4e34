//! Balance sheet routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use moneyview_core::reports::BalanceSheetResponse;
use moneyview_shared::AppError;
use moneyview_shared::types::PageRequest;
use tracing::{error, info};

use crate::{ApiError, AppState};

/// Creates the balance sheet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/balance-sheet", get(get_balance_sheet))
        .route("/api/balance-sheet/", get(get_balance_sheet))
}

/// Query parameters for the balance sheet.
///
/// Kept as raw strings so malformed numbers get the same 422 body as
/// out-of-range ones.
#[derive(Debug, Default)]
pub struct BalanceSheetQuery {
    /// Page number (1-indexed).
    pub page: Option<String>,
    /// Rows per page.
    pub page_size: Option<String>,
}

impl BalanceSheetQuery {
    /// Collects the known parameters from decoded query pairs.
    ///
    /// A repeated key keeps its last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |mut query, (key, value)| {
                match key.as_str() {
                    "page" => query.page = Some(value),
                    "page_size" => query.page_size = Some(value),
                    _ => {}
                }
                query
            })
    }

    /// Parses and bounds-checks the query.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for non-integer or out-of-range values.
    pub fn into_page_request(self) -> Result<PageRequest, AppError> {
        let defaults = PageRequest::default();
        let request = PageRequest::new(
            parse_param("page", self.page.as_deref(), defaults.page)?,
            parse_param("page_size", self.page_size.as_deref(), defaults.page_size)?,
        );
        request.validate()?;
        Ok(request)
    }
}

/// Parses one integer parameter, clamping into `u32` so the bounds check
/// reports negative and oversized values.
fn parse_param(field: &'static str, raw: Option<&str>, default: u32) -> Result<u32, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation(field, format!("{field} must be a valid integer")))?;
    Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

/// GET /api/balance-sheet
async fn get_balance_sheet(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<BalanceSheetResponse>, ApiError> {
    let request = BalanceSheetQuery::from_pairs(pairs).into_page_request()?;
    info!(
        page = request.page,
        page_size = request.page_size,
        "Received request for balance sheet"
    );

    match state.balance_sheet.get_balance_sheet(request).await {
        Ok(response) => {
            info!(
                total_rows = response.total_rows,
                total_pages = response.total_pages,
                "Successfully retrieved balance sheet"
            );
            Ok(Json(response))
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Error in balance sheet route");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> BalanceSheetQuery {
        BalanceSheetQuery {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let query = BalanceSheetQuery::from_pairs(pairs(&[
            ("page", "1"),
            ("page_size", "5"),
            ("page", "2"),
            ("sort", "asc"),
        ]));
        assert_eq!(query.into_page_request().unwrap(), PageRequest::new(2, 5));
    }

    #[test]
    fn test_defaults_when_absent() {
        let request = BalanceSheetQuery::default().into_page_request().unwrap();
        assert_eq!(request, PageRequest::new(1, 10));
    }

    #[rstest]
    #[case(Some("3"), Some("25"), PageRequest::new(3, 25))]
    #[case(Some(" 2 "), None, PageRequest::new(2, 10))]
    #[case(None, Some("100"), PageRequest::new(1, 100))]
    #[case(Some("99999999999"), None, PageRequest::new(u32::MAX, 10))]
    fn test_accepts(
        #[case] page: Option<&str>,
        #[case] page_size: Option<&str>,
        #[case] expected: PageRequest,
    ) {
        assert_eq!(query(page, page_size).into_page_request().unwrap(), expected);
    }

    #[rstest]
    #[case(Some("0"), None, "page", "page must be greater than or equal to 1")]
    #[case(Some("-4"), None, "page", "page must be greater than or equal to 1")]
    #[case(Some("two"), None, "page", "page must be a valid integer")]
    #[case(None, Some("0"), "page_size", "page_size must be greater than or equal to 1")]
    #[case(None, Some("101"), "page_size", "page_size must be less than or equal to 100")]
    #[case(None, Some(""), "page_size", "page_size must be a valid integer")]
    fn test_rejects(
        #[case] page: Option<&str>,
        #[case] page_size: Option<&str>,
        #[case] expected_field: &str,
        #[case] expected_message: &str,
    ) {
        match query(page, page_size).into_page_request() {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, expected_field);
                assert_eq!(message, expected_message);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use moneyview_core::reports::ReportError;
use moneyview_shared::AppError;
use serde_json::json;

/// Wrapper turning an [`AppError`] into an HTTP response.
///
/// Validation failures become 422 with a list of field problems; everything
/// else becomes a status from [`AppError::status_code`] with
/// `{"detail": {"message", "type"}}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            AppError::Validation { field, message } => json!({
                "detail": [{
                    "loc": ["query", field],
                    "msg": message,
                    "type": "value_error",
                }]
            }),
            AppError::ExternalService { .. } => json!({
                "detail": {
                    "message": self.0.to_string(),
                    "type": self.0.kind(),
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}

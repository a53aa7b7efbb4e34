use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::validation("page", "test").status_code(), 422);
    assert_eq!(
        AppError::external("UpstreamSchemaError", "test").status_code(),
        500
    );
}

#[test]
fn test_app_error_kind_labels() {
    assert_eq!(AppError::validation("page", "x").kind(), "ValidationError");
    assert_eq!(
        AppError::external("RetriesExhaustedError", "x").kind(),
        "RetriesExhaustedError"
    );
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!(
            "{}",
            AppError::validation("page", "page must be greater than or equal to 1")
        ),
        "Validation error: page must be greater than or equal to 1"
    );
    assert_eq!(
        format!(
            "{}",
            AppError::external("UpstreamTransportError", "connection refused")
        ),
        "connection refused"
    );
}

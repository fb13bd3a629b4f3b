use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use warehouse_core::DomainError;

/// Map a domain error to a consistent JSON error response.
///
/// Validation and duplicate-sku failures carry a machine-readable `fields`
/// array naming every offending field; nothing else about the failure leaks
/// implementation detail.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "message": "validation failed",
                "fields": errors.violations(),
            })),
        )
            .into_response(),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::DuplicateSku(sku) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "duplicate_sku",
                "message": format!("product with sku '{sku}' already exists"),
                "fields": [{"field": "sku", "message": "sku is already taken"}],
            })),
        )
            .into_response(),
        DomainError::InsufficientStock {
            requested,
            available,
        } => json_error(
            StatusCode::BAD_REQUEST,
            "insufficient_stock",
            format!(
                "insufficient stock to complete the order: requested {requested}, available {available}"
            ),
        ),
        DomainError::Storage(msg) => {
            // Full detail goes to the log, never to the client.
            tracing::error!("store failure: {msg}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "internal storage failure",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

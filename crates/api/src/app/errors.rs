use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;

/// Map an engine error to its HTTP status and stable error code.
pub fn classify(err: &DomainError) -> (StatusCode, &'static str) {
    let code = match err {
        DomainError::NilEntity => "nil_entity",
        DomainError::InvalidId => "invalid_id",
        DomainError::EmptyName => "empty_name",
        DomainError::NegativeStock => "negative_stock",
        DomainError::NegativeThreshold => "negative_threshold",
        DomainError::InvalidAmount => "invalid_amount",
        DomainError::InsufficientStock => "insufficient_stock",
        DomainError::StockOverflow => "stock_overflow",
        DomainError::NotFound => "not_found",
        DomainError::Storage(_) => "internal_error",
    };
    let status = match err {
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        DomainError::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, code)
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let (status, code) = classify(&err);
    match err {
        // Storage detail stays in the log.
        DomainError::Storage(e) => {
            tracing::error!(error = %e, "storage failure");
            json_error(status, code, "internal server error")
        }
        other => {
            if other.is_validation() {
                tracing::debug!(code, "request rejected: {other}");
            } else {
                tracing::debug!(code, "{other}");
            }
            json_error(status, code, other.to_string())
        }
    }
}

pub fn invalid_body(rejection: JsonRejection) -> axum::response::Response {
    tracing::debug!("malformed request body: {rejection}");
    json_error(StatusCode::BAD_REQUEST, "invalid_body", "invalid request body")
}

pub fn invalid_path_id() -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product ID")
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

use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorCode::NotFound.default_message().to_string(),
        ErrorCode::NotFound,
    )
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        ErrorCode::MethodNotAllowed,
    )
}

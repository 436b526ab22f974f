pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "event 'missing-1' not found",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details, e.g. per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type rendered as an [`ErrorResponse`].
///
/// Domain crates convert their own error enums into this one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(e)) => e.status(),
            AppError::JsonExtractorRejection(_) => StatusCode::BAD_REQUEST,
            AppError::QueryExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::SerdeJson(_)
            | AppError::Io(_)
            | AppError::Database(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::SerdeJson(_) => ErrorCode::SerdeJsonError,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        // Server-side causes are logged, never returned.
        if code.is_client_error() {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        } else if status == StatusCode::SERVICE_UNAVAILABLE {
            tracing::warn!(error_code = code.code(), error = %self, "Service unavailable");
        } else {
            tracing::error!(error_code = code.code(), error = ?self, "Request failed");
        }

        let body = match self {
            AppError::JsonExtractorRejection(e) => ErrorResponse::new(code, e.body_text()),
            AppError::QueryExtractorRejection(e) => ErrorResponse::new(code, e.body_text()),
            AppError::ValidationError(e) => ErrorResponse::new(code, code.default_message())
                .with_details(serde_json::to_value(&e).unwrap_or(serde_json::Value::Null)),
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ServiceUnavailable(msg) => ErrorResponse::new(code, msg),
            AppError::SerdeJson(_)
            | AppError::Io(_)
            | AppError::Database(_)
            | AppError::InternalServerError(_) => ErrorResponse::new(code, code.default_message()),
        };

        (status, Json(body)).into_response()
    }
}

/// Render an error body without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

//! Machine-readable error codes carried by every error response.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NotFound;
//! assert_eq!(code.as_str(), "NOT_FOUND");
//! assert_eq!(code.code(), 1004);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error identifiers shared by all services.
///
/// Integer ranges: 1000-1999 request and server errors, 2000-2999 database
/// errors, 4000s I/O, 5000s serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body failed `validator` rules
    ValidationError,
    /// Input was well-formed but not acceptable
    BadRequest,
    /// Request body could not be read as JSON
    JsonExtraction,
    NotFound,
    /// Query string could not be parsed
    InvalidQuery,
    MethodNotAllowed,
    InternalError,
    ServiceUnavailable,
    /// The record store rejected or failed an operation
    DatabaseError,
    IoError,
    SerdeJsonError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier placed in the `error` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer placed in the `code` field and in `error_code` log fields.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::BadRequest => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::InvalidQuery => 1006,
            Self::MethodNotAllowed => 1007,
            Self::ServiceUnavailable => 1010,
            Self::DatabaseError => 2001,
            Self::IoError => 4001,
            Self::SerdeJsonError => 5001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::BadRequest => "Invalid input",
            Self::JsonExtraction => "Failed to extract JSON from request body",
            Self::NotFound => "The requested resource was not found",
            Self::InvalidQuery => "Invalid query parameters",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "A database error occurred",
            Self::IoError => "An I/O error occurred",
            Self::SerdeJsonError => "Failed to process JSON data",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError
                | Self::BadRequest
                | Self::JsonExtraction
                | Self::NotFound
                | Self::InvalidQuery
                | Self::MethodNotAllowed
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_name_matches_as_str() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::NotFound,
            ErrorCode::InvalidQuery,
            ErrorCode::DatabaseError,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::json!(code.as_str()));
        }
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ErrorCode::NotFound.is_client_error());
        assert!(ErrorCode::InvalidQuery.is_client_error());
        assert!(!ErrorCode::InternalError.is_client_error());
        assert!(!ErrorCode::DatabaseError.is_client_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::BadRequest.to_string(), "BAD_REQUEST");
    }
}

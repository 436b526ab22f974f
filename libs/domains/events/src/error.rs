//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub type EventResult<T> = Result<T, EventError>;

#[derive(Debug, Error)]
pub enum EventError {
    /// The addressed record does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Missing or malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl EventError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "event",
            id: id.into(),
        }
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { .. } => AppError::NotFound(err.to_string()),
            EventError::InvalidInput(msg) => AppError::BadRequest(msg),
            EventError::Database(e) => AppError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

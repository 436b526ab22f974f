//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed `validator` rules.
///
/// Malformed JSON is rejected with `JSON_EXTRACTION`, rule violations with
/// `VALIDATION_ERROR` and the per-field errors under `details`. Nested
/// payloads (`#[validate(nested)]`) report errors under their parent field.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateEvent {
///     #[validate(length(min = 1))]
///     author_id: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateEvent>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

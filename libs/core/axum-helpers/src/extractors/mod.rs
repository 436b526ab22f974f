//! Extractors that reject with the standard [`ErrorResponse`](crate::ErrorResponse) body.

pub mod query;
pub mod validated_json;

pub use query::QueryParams;
pub use validated_json::ValidatedJson;

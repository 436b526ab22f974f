use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// `Query<T>` whose rejection is an [`AppError`] (`400 INVALID_QUERY`)
/// instead of axum's plain-text body.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Flags {
        visible: Option<bool>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|QueryParams(f): QueryParams<Flags>| async move {
                format!("{:?}", f.visible)
            }),
        )
    }

    #[tokio::test]
    async fn test_parses_query() {
        let response = app()
            .oneshot(Request::get("/?visible=true").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Some(true)");
    }

    #[tokio::test]
    async fn test_invalid_value_is_json_error() {
        let response = app()
            .oneshot(Request::get("/?visible=maybe").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "INVALID_QUERY");
    }
}

//! API routes, nested under `/api` by `axum_helpers::create_router`.

pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/events", events::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use crate::openapi::ApiDoc;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::create_router_with_cors;
    use domain_events::{EventService, InMemoryEventRepository};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use tower_http::cors::CorsLayer;

    fn app() -> Router {
        let events = domain_events::router(EventService::new(InMemoryEventRepository::new()));
        create_router_with_cors::<ApiDoc>(
            Router::new().nest("/events", events),
            CorsLayer::permissive(),
        )
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_events_are_served_under_api_prefix() {
        let app = app();

        let create = Request::post("/api/events")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "data": {
                        "authorId": "u1",
                        "locationId": "loc1",
                        "dateStart": "2024-01-01",
                        "dateEnd": "2024-01-02"
                    }
                })
                .to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["data"]["_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::get(format!("/api/events/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["status"], "PLANNED");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert!(doc["paths"].get("/api/events/{id}").is_some());
    }
}

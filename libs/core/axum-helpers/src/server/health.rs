use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A named dependency probe; `Err` carries the failure reason.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Run every probe concurrently.
///
/// The body is `{"status": "ready" | "not ready", "<name>": "connected" |
/// "disconnected", ...}`; any failure turns the status into 503.
///
/// ```ignore
/// run_health_checks(vec![(
///     "mongodb",
///     Box::pin(async move {
///         check_health_detailed(&db).await.message.map_or(Ok(()), Err)
///     }),
/// )])
/// .await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> (StatusCode, Json<Value>) {
    let (names, futures): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(futures).await;

    let mut body = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        let state = match result {
            Ok(()) => "connected",
            Err(e) => {
                tracing::error!(check = name, error = %e, "Readiness check failed");
                all_healthy = false;
                "disconnected"
            }
        };
        body.insert(name.to_string(), json!(state));
    }

    body.insert(
        "status".to_string(),
        json!(if all_healthy { "ready" } else { "not ready" }),
    );

    let status = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(Value::Object(body)))
}

/// Liveness: 200 whenever the process can serve requests.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// `GET /health` reporting the binary's name and version.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_router_reports_app_info() {
        let app = health_router(AppInfo {
            name: "events-api",
            version: "1.2.3",
        });

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["name"], "events-api");
        assert_eq!(json["version"], "1.2.3");
    }

    #[tokio::test]
    async fn test_run_health_checks_all_ok() {
        let ok: HealthCheckFuture = Box::pin(async { Ok(()) });
        let (status, Json(body)) = run_health_checks(vec![("mongodb", ok)]).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["mongodb"], "connected");
    }

    #[tokio::test]
    async fn test_run_health_checks_one_failing() {
        let failing: HealthCheckFuture = Box::pin(async { Err("timeout".to_string()) });
        let ok: HealthCheckFuture = Box::pin(async { Ok(()) });
        let (status, Json(body)) =
            run_health_checks(vec![("mongodb", failing), ("other", ok)]).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
        assert_eq!(body["other"], "connected");
    }
}

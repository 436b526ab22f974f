//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health_detailed;
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 when MongoDB answers a ping, 503 otherwise.
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mongodb: HealthCheckFuture = Box::pin(async move {
        let status = check_health_detailed(&state.db).await;
        tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_default())
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}

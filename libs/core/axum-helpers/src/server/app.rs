use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Wrap the API routes with documentation, fallbacks and the shared layer
/// stack.
///
/// - OpenAPI JSON at `/api-docs/openapi.json`; Swagger UI at `/swagger-ui`,
///   ReDoc at `/redoc`, RapiDoc at `/rapidoc`, Scalar at `/scalar`
/// - `apis` nested under `/api` (state must already be applied)
/// - JSON 404 and 405 fallbacks
/// - request tracing, security headers, CORS, response compression
///
/// Fails when `CORS_ALLOWED_ORIGIN` is missing, empty or malformed.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    Ok(create_router_with_cors::<T>(apis, cors_layer_from_env()?))
}

/// [`create_router`] with an explicit CORS policy.
pub fn create_router_with_cors<T>(apis: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Serve `router` and run `cleanup` once a shutdown signal arrives.
///
/// In-flight requests drain while `cleanup` runs; `cleanup` is abandoned
/// after `shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let mut shutdown_rx = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        if shutdown_rx.recv().await.is_err() {
            return;
        }

        info!(timeout = ?shutdown_timeout, "Running cleanup tasks");
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed"),
            Err(_) => warn!(timeout = ?shutdown_timeout, "Cleanup timed out, forcing shutdown"),
        }
    });

    let signal = coordinator.clone();
    let serve_result = axum::serve(listener, router)
        .with_graceful_shutdown(async move { signal.wait_for_signal().await })
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "Server encountered an error"));

    // Server errors bypass the signal path; release the cleanup task anyway.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with OpenAPI viewers, health endpoint,
//!   graceful shutdown
//! - **[`http`]**: CORS and security header layers
//! - **[`errors`]**: [`AppError`] and the uniform [`ErrorResponse`] body
//! - **[`extractors`]**: [`ValidatedJson`] and [`QueryParams`]
//! - **[`audit`]**: structured audit records on the `audit` target

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, create_router_with_cors, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{QueryParams, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome};

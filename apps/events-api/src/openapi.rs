//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "Create, list, update and cancel scheduled events",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc)
    ),
    components(schemas(axum_helpers::HealthResponse)),
    tags(
        (name = "events", description = "Event scheduling, membership and cancellation")
    )
)]
pub struct ApiDoc;

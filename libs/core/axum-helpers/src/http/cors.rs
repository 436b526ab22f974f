use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

const CORS_ENV: &str = "CORS_ALLOWED_ORIGIN";

/// Parse a comma-separated origin list. Blank entries are skipped; an
/// empty result is an error.
pub fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {CORS_ENV} value: {e}"),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{CORS_ENV} cannot be empty"),
        ));
    }

    Ok(origins)
}

/// CORS policy for the API: listed origins, the verbs the API uses, JSON
/// headers, one hour preflight cache.
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Build the CORS layer from the required `CORS_ALLOWED_ORIGIN` variable,
/// e.g. `http://localhost:3000,https://app.example.com`.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var(CORS_ENV).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{CORS_ENV} environment variable is required. Example: {CORS_ENV}=http://localhost:3000"
            ),
        )
    })?;

    let origins = parse_allowed_origins(&raw)?;
    info!(origins = %raw, "CORS configured");

    Ok(create_cors_layer(origins))
}

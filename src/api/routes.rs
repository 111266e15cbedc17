//! HTTP API route definitions.

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::docs::openapi_json;
use super::handlers::{
    create_status_check, health, list_status_checks, metrics_export, ready, root, submit_contact,
    AppState,
};

/// Build the CORS layer for the configured origins.
///
/// Credentials are allowed, so a literal `*` cannot be sent back; with `*`
/// configured the request's own origin is mirrored instead.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let values = origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Create the API router.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics_export))
        // Public API
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/contact", post(submit_contact))
        .route(
            "/api/status",
            get(list_status_checks).post(create_status_check),
        )
        .route("/api/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

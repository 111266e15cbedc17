//! OpenAPI description of the public endpoints.

use axum::Json;
use utoipa::OpenApi;

use super::handlers;
use crate::models::{ContactRequest, ContactResponse, StatusCheck, StatusCheckCreate};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::submit_contact,
        handlers::create_status_check,
        handlers::list_status_checks,
    ),
    components(schemas(
        handlers::RootResponse,
        ContactRequest,
        ContactResponse,
        StatusCheck,
        StatusCheckCreate,
    )),
    tags(
        (name = "meta", description = "Service greeting"),
        (name = "contact", description = "Contact-form submissions"),
        (name = "status", description = "Status-check records"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_public_path() {
        let doc = ApiDoc::openapi();
        for path in ["/api/", "/api/contact", "/api/status"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use super::extract::ValidatedJson;
use crate::error::{ApiError, StorageError};
use crate::locale::Locale;
use crate::mail::ContactNotifier;
use crate::metrics;
use crate::models::{
    ContactMessage, ContactRequest, ContactResponse, ContactStatus, StatusCheck,
    StatusCheckCreate, CONTACT_COLLECTION, MAX_STATUS_LIST, STATUS_COLLECTION,
};
use crate::storage::{self, DocumentStore, Projection};

/// Application state shared with handlers.
///
/// Built once at startup; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Document store for both collections.
    pub store: Arc<dyn DocumentStore>,
    /// Contact relay, `None` when mail is not configured.
    pub notifier: Option<Arc<ContactNotifier>>,
    /// Language of user-facing messages.
    pub locale: Locale,
    /// Prometheus scrape handle.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without relay or metrics.
    pub fn new(store: Arc<dyn DocumentStore>, locale: Locale) -> Self {
        Self {
            store,
            notifier: None,
            locale,
            metrics: None,
        }
    }

    /// Enable contact notifications.
    pub fn with_notifier(mut self, notifier: ContactNotifier) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Expose metrics at `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Root greeting.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the store answered a ping.
    pub ready: bool,
}

/// Log a storage failure and turn it into a caller-safe error.
fn storage_failure(err: StorageError, operation: &'static str, message: &'static str) -> ApiError {
    error!(error = %err, operation, "storage operation failed");
    metrics::inc_storage_errors(operation);
    ApiError::Internal { message }
}

async fn persist<T: Serialize>(
    state: &AppState,
    collection: &str,
    record: &T,
    failure_message: &'static str,
) -> Result<(), ApiError> {
    let document =
        storage::encode(record).map_err(|e| storage_failure(e, "encode", failure_message))?;
    state
        .store
        .insert(collection, document)
        .await
        .map_err(|e| storage_failure(e, "insert", failure_message))
}

/// Try to relay a submission; the outcome only decides the stored status.
async fn relay_contact(state: &AppState, contact: &ContactRequest) -> ContactStatus {
    let Some(notifier) = &state.notifier else {
        debug!("mail relay disabled, storing contact only");
        return ContactStatus::Received;
    };

    match notifier.notify(contact).await {
        Ok(()) => ContactStatus::Sent,
        Err(e) => {
            error!(
                error = %e,
                recipient = notifier.recipient(),
                "failed to relay contact notification"
            );
            metrics::inc_relay_failures();
            ContactStatus::Received
        }
    }
}

/// Root handler.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "meta",
    responses((status = 200, description = "Greeting", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello World".to_string(),
    })
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if the store answers, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ReadyResponse { ready: true })),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse { ready: false }),
            )
        }
    }
}

/// Prometheus scrape endpoint.
pub async fn metrics_export(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Accept a contact submission, relay it by mail when possible, and store it.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission stored", body = ContactResponse),
        (status = 422, description = "Missing field or invalid email"),
        (status = 500, description = "Submission could not be stored")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(contact): ValidatedJson<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    metrics::inc_contacts_received();

    let status = relay_contact(&state, &contact).await;
    let record = ContactMessage::new(contact, status);

    persist(
        &state,
        CONTACT_COLLECTION,
        &record,
        state.locale.contact_failure(),
    )
    .await?;

    info!(id = %record.id, status = %record.status, "contact message stored");
    Ok(Json(ContactResponse::success(state.locale.contact_success())))
}

/// Create a status check.
#[utoipa::path(
    post,
    path = "/api/status",
    tag = "status",
    request_body = StatusCheckCreate,
    responses(
        (status = 200, description = "Created record", body = StatusCheck),
        (status = 422, description = "Missing or empty client_name"),
        (status = 500, description = "Record could not be stored")
    )
)]
pub async fn create_status_check(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = StatusCheck::new(input.client_name);

    persist(
        &state,
        STATUS_COLLECTION,
        &check,
        state.locale.internal_error(),
    )
    .await?;

    metrics::inc_status_checks_created();
    debug!(id = %check.id, client = %check.client_name, "status check created");
    Ok(Json(check))
}

/// List stored status checks, at most [`MAX_STATUS_LIST`].
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "status",
    responses(
        (status = 200, description = "Stored records", body = [StatusCheck]),
        (status = 500, description = "Storage unavailable")
    )
)]
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let message = state.locale.internal_error();

    let documents = state
        .store
        .find_all(
            STATUS_COLLECTION,
            &Projection::without_internal_id(),
            MAX_STATUS_LIST,
        )
        .await
        .map_err(|e| storage_failure(e, "find", message))?;

    let checks = documents
        .into_iter()
        .map(storage::decode::<StatusCheck>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| storage_failure(e, "decode", message))?;

    Ok(Json(checks))
}

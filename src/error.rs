//! Unified error types for the service.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Errors raised while bringing the service up or tearing it down.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Mail relay error.
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Driver-level failure (connection, write, cursor).
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A record could not be converted into a document.
    #[error("failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    /// A stored document could not be converted back into a record.
    #[error("failed to decode document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    /// Store is not reachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Outbound mail errors.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Sender, recipient or reply-to address did not parse.
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Message could not be assembled.
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// Connection, TLS, authentication or delivery failure.
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Relay refused the message.
    #[error("relay rejected message: {0}")]
    Rejected(String),
}

/// A single invalid input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the request body.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors surfaced to HTTP callers.
///
/// Every variant maps to a fixed status code and a short `detail` body;
/// driver or transport text never reaches the response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body parsed but one or more fields are invalid.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Body could not be extracted as JSON of the expected shape.
    #[error("request rejected ({status}): {detail}")]
    Rejection {
        /// Status chosen by the extractor.
        status: StatusCode,
        /// Extractor message.
        detail: String,
    },

    /// Server-side failure with a localized message.
    #[error("internal error: {message}")]
    Internal {
        /// Message shown to the caller.
        message: &'static str,
    },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejection {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": errors })),
            )
                .into_response(),
            ApiError::Rejection { status, detail } => {
                (status, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": message })),
            )
                .into_response(),
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

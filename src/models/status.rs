//! Status-check records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::FieldError;
use crate::validation::{require_non_blank, Validate};

/// Collection holding status checks.
pub const STATUS_COLLECTION: &str = "status_checks";

/// Most records returned by a single listing.
pub const MAX_STATUS_LIST: usize = 1000;

/// A timestamped record created by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCheck {
    /// Server-generated UUID.
    pub id: String,
    /// Caller-supplied name.
    pub client_name: String,
    /// Creation time, UTC.
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// Create a record with a fresh id and the current time.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `POST /api/status`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl Validate for StatusCheckCreate {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_non_blank("client_name", &self.client_name, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

//! Contact-form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::FieldError;
use crate::validation::{is_valid_email, Validate};

/// Collection holding contact submissions.
pub const CONTACT_COLLECTION: &str = "contact_messages";

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Sender's name.
    pub name: String,
    /// Sender's address, used as Reply-To.
    pub email: String,
    /// Free text.
    pub message: String,
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err(vec![FieldError::new(
                "email",
                "value is not a valid email address",
            )])
        }
    }
}

/// Outcome of the relay step, stored with the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
    /// Relay accepted the notification.
    Sent,
    /// Stored only; relay disabled or failed.
    Received,
}

/// Persisted form of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: ContactStatus,
}

impl ContactMessage {
    /// Stamp a request with a fresh id, the current time and its relay outcome.
    pub fn new(request: ContactRequest, status: ContactStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            message: request.message,
            timestamp: Utc::now(),
            status,
        }
    }
}

/// Body returned once a submission is stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Always `"success"`.
    pub status: String,
    /// Localized confirmation.
    pub message: String,
}

impl ContactResponse {
    pub fn success(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn request(email: &str) -> ContactRequest {
        ContactRequest {
            name: "Jane".to_string(),
            email: email.to_string(),
            message: "Hello".to_string(),
        }
    }

    #[test]
    fn invalid_email_is_reported_on_email_field() {
        let errors = request("not-an-email").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn valid_email_passes() {
        assert!(request("jane@example.com").validate().is_ok());
    }

    #[test]
    fn status_label_is_lowercase_in_documents() {
        let record = ContactMessage::new(request("jane@example.com"), ContactStatus::Sent);
        let doc = bson::to_document(&record).unwrap();
        assert_eq!(doc.get_str("status").unwrap(), "sent");
        assert_eq!(ContactStatus::Received.as_ref(), "received");
    }
}

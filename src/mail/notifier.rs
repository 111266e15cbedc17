//! Contact notification delivery.

use std::sync::Arc;

use tracing::info;

use super::template::render_contact_html;
use super::{MailRelay, OutgoingMail, SmtpRelay};
use crate::config::SmtpSettings;
use crate::error::RelayError;
use crate::locale::Locale;
use crate::models::ContactRequest;

/// Sends each contact submission to a fixed recipient.
#[derive(Clone)]
pub struct ContactNotifier {
    relay: Arc<dyn MailRelay>,
    sender: String,
    recipient: String,
    locale: Locale,
}

impl ContactNotifier {
    /// Create a notifier over any relay.
    pub fn new(
        relay: Arc<dyn MailRelay>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        locale: Locale,
    ) -> Self {
        Self {
            relay,
            sender: sender.into(),
            recipient: recipient.into(),
            locale,
        }
    }

    /// Create a notifier over SMTP from resolved settings.
    pub fn from_settings(settings: &SmtpSettings, locale: Locale) -> Result<Self, RelayError> {
        let relay = SmtpRelay::new(settings)?;
        Ok(Self::new(
            Arc::new(relay),
            settings.sender.clone(),
            settings.recipient.clone(),
            locale,
        ))
    }

    /// Recipient of every notification.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Build the mail for one submission.
    pub fn compose(&self, contact: &ContactRequest) -> OutgoingMail {
        OutgoingMail {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            reply_to: contact.email.clone(),
            subject: self.locale.contact_subject(&contact.name),
            html_body: render_contact_html(contact, self.locale),
        }
    }

    /// Relay the notification for one submission.
    pub async fn notify(&self, contact: &ContactRequest) -> Result<(), RelayError> {
        self.relay.send(self.compose(contact)).await?;
        info!(
            recipient = %self.recipient,
            sender_name = %contact.name,
            reply_to = %contact.email,
            "contact notification sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::MockRelay;

    fn contact() -> ContactRequest {
        ContactRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn notify_addresses_mail_from_settings() {
        let relay = MockRelay::new();
        let notifier = ContactNotifier::new(
            Arc::new(relay.clone()),
            "site@example.com",
            "owner@example.com",
            Locale::Fr,
        );

        notifier.notify(&contact()).await.unwrap();

        let sent = relay.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "site@example.com");
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].reply_to, "jane@example.com");
        assert_eq!(sent[0].subject, "Portfolio Contact: Message de Jane");
    }

    #[tokio::test]
    async fn notify_surfaces_relay_errors() {
        let relay = MockRelay::failing();
        let notifier = ContactNotifier::new(
            Arc::new(relay.clone()),
            "site@example.com",
            "owner@example.com",
            Locale::En,
        );

        assert!(notifier.notify(&contact()).await.is_err());
        assert!(relay.sent().is_empty());
    }
}

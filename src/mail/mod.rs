//! Outbound mail: relay abstraction, SMTP transport and contact notifications.
//!
//! This module handles:
//! - The [`MailRelay`] trait and the message it sends
//! - SMTP delivery with STARTTLS
//! - Rendering and sending the contact notification
//! - Mock relay for testing

pub mod mock;
pub mod notifier;
pub mod smtp;
pub mod template;

use async_trait::async_trait;

use crate::error::RelayError;

pub use mock::MockRelay;
pub use notifier::ContactNotifier;
pub use smtp::SmtpRelay;

/// A single HTML message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
}

/// Trait for outbound mail transports.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Delivers one message; errors are returned, never panicked.
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError>;
}

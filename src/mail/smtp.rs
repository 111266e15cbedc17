//! SMTP relay over STARTTLS.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Response;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use super::{MailRelay, OutgoingMail};
use crate::config::SmtpSettings;
use crate::error::RelayError;
use crate::metrics;

/// Authenticated SMTP relay.
///
/// The transport is built without a connection pool, so each [`send`]
/// opens, uses and closes its own connection.
///
/// [`send`]: MailRelay::send
#[derive(Clone)]
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpRelay {
    /// Build a STARTTLS transport from resolved settings.
    pub fn new(settings: &SmtpSettings) -> Result<Self, RelayError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(settings.timeout_seconds)))
            .build();

        Ok(Self {
            transport,
            host: settings.host.clone(),
        })
    }

    fn build_message(mail: OutgoingMail) -> Result<Message, RelayError> {
        let message = Message::builder()
            .from(mail.from.parse::<Mailbox>()?)
            .to(mail.to.parse::<Mailbox>()?)
            .reply_to(mail.reply_to.parse::<Mailbox>()?)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body)?;
        Ok(message)
    }
}

/// Describe a negative relay reply by code and text.
fn rejection(response: &Response) -> RelayError {
    RelayError::Rejected(format!(
        "{} {}",
        response.code(),
        response.message().collect::<Vec<_>>().join(" ")
    ))
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        let message = Self::build_message(mail)?;

        let _timer = metrics::timer_relay_send();
        let response = self.transport.send(message).await?;

        if !response.is_positive() {
            return Err(rejection(&response));
        }

        debug!(host = %self.host, code = %response.code(), "relay accepted message");
        Ok(())
    }
}

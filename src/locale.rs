//! User-facing strings in the service's configured language.

use serde::Deserialize;
use strum::{Display, EnumString};

/// Language of responses and notification mails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    /// French.
    #[default]
    Fr,
    /// English.
    En,
}

impl TryFrom<String> for Locale {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

/// Labels used by the notification template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateLabels {
    pub heading: &'static str,
    pub from: &'static str,
    pub email: &'static str,
    pub message: &'static str,
    pub footer: &'static str,
}

impl Locale {
    /// Confirmation returned after a contact submission is stored.
    pub fn contact_success(self) -> &'static str {
        match self {
            Locale::Fr => {
                "Votre message a été envoyé avec succès ! Je vous répondrai dès que possible."
            }
            Locale::En => "Your message has been sent successfully! I will get back to you soon.",
        }
    }

    /// Error returned when a contact submission could not be stored.
    pub fn contact_failure(self) -> &'static str {
        match self {
            Locale::Fr => "Erreur lors de l'envoi du message. Veuillez réessayer plus tard.",
            Locale::En => "Error while sending the message. Please try again later.",
        }
    }

    /// Generic internal error.
    pub fn internal_error(self) -> &'static str {
        match self {
            Locale::Fr => "Erreur interne du serveur. Veuillez réessayer plus tard.",
            Locale::En => "Internal server error. Please try again later.",
        }
    }

    /// Subject line of the notification mail.
    pub fn contact_subject(self, sender_name: &str) -> String {
        match self {
            Locale::Fr => format!("Portfolio Contact: Message de {sender_name}"),
            Locale::En => format!("Portfolio Contact: Message from {sender_name}"),
        }
    }

    pub fn template_labels(self) -> TemplateLabels {
        match self {
            Locale::Fr => TemplateLabels {
                heading: "Nouveau message depuis votre portfolio",
                from: "De",
                email: "Email",
                message: "Message",
                footer: "Ce message a été envoyé depuis votre portfolio professionnel.",
            },
            Locale::En => TemplateLabels {
                heading: "New message from your portfolio",
                from: "From",
                email: "Email",
                message: "Message",
                footer: "This message was sent from your professional portfolio.",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Locale::from_str("FR").unwrap(), Locale::Fr);
        assert_eq!(Locale::from_str("en").unwrap(), Locale::En);
        assert!(Locale::from_str("de").is_err());
    }

    #[test]
    fn deserializes_any_case() {
        let upper: Locale = serde_json::from_str("\"FR\"").unwrap();
        let mixed: Locale = serde_json::from_str("\"En\"").unwrap();
        assert_eq!(upper, Locale::Fr);
        assert_eq!(mixed, Locale::En);
        assert!(serde_json::from_str::<Locale>("\"de\"").is_err());
    }

    #[test]
    fn subject_includes_sender() {
        assert_eq!(
            Locale::Fr.contact_subject("Jane"),
            "Portfolio Contact: Message de Jane"
        );
        assert!(Locale::En.contact_subject("Jane").ends_with("Jane"));
    }
}

//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::locale::Locale;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Database ===
    /// MongoDB connection string.
    pub mongo_url: String,

    /// Logical database holding both collections.
    pub db_name: String,

    // === HTTP ===
    /// Comma-separated list of allowed origins, `*` for any.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Language used for user-facing messages and the notification mail.
    #[serde(default)]
    pub service_language: Locale,

    // === Mail relay ===
    /// SMTP relay host. Relay is disabled when unset.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Sender address, also the login unless `smtp_username` is set.
    #[serde(default)]
    pub smtp_email: Option<String>,

    /// Explicit SMTP login.
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Address receiving contact notifications.
    #[serde(default)]
    pub receiver_email: Option<String>,

    /// Upper bound on a single relay attempt.
    #[serde(default = "default_smtp_timeout")]
    pub smtp_timeout_seconds: u64,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

/// Resolved SMTP settings, present only when the relay is fully configured.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// Relay host.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Login name.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Envelope and header sender.
    pub sender: String,
    /// Notification recipient.
    pub recipient: String,
    /// Per-attempt timeout in seconds.
    pub timeout_seconds: u64,
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

/// An optional variable, with blank values treated as unset.
fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.trim().is_empty())
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.mongo_url.trim().is_empty() {
            return Err("MONGO_URL is required".to_string());
        }

        if self.db_name.trim().is_empty() {
            return Err("DB_NAME is required".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.cors_origin_list().is_empty() {
            return Err("CORS_ORIGINS must list at least one origin".to_string());
        }

        let smtp_fields = [
            non_blank(&self.smtp_host).is_some(),
            non_blank(&self.smtp_email).is_some(),
            non_blank(&self.smtp_password).is_some(),
            non_blank(&self.receiver_email).is_some(),
        ];
        let set = smtp_fields.iter().filter(|f| **f).count();
        if set != 0 && set != smtp_fields.len() {
            return Err(
                "SMTP_HOST, SMTP_EMAIL, SMTP_PASSWORD and RECEIVER_EMAIL must be set together"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Allowed CORS origins, trimmed, empty entries dropped.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// SMTP settings when every relay variable is present and non-blank.
    pub fn smtp(&self) -> Option<SmtpSettings> {
        let host = non_blank(&self.smtp_host)?;
        let sender = non_blank(&self.smtp_email)?;
        let password = non_blank(&self.smtp_password)?;
        let recipient = non_blank(&self.receiver_email)?;

        Some(SmtpSettings {
            host,
            port: self.smtp_port,
            username: non_blank(&self.smtp_username).unwrap_or_else(|| sender.clone()),
            password,
            sender,
            recipient,
            timeout_seconds: self.smtp_timeout_seconds,
        })
    }

    /// Check if the mail relay is enabled.
    pub fn relay_enabled(&self) -> bool {
        self.smtp().is_some()
    }
}

//! Outbound mail (SMTP) configuration.

use serde::{Deserialize, Serialize};

/// SMTP relay configuration for outbound notifications.
///
/// When `enabled` is false the mailer is replaced by a no-op and every
/// dispatch is silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether outbound mail is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// SMTP account username.
    #[serde(default)]
    pub username: String,
    /// SMTP account password.
    #[serde(default)]
    pub password: String,
    /// From header, e.g. `No Reply <noreply@example.com>`.
    #[serde(default)]
    pub from: String,
    /// Login URL included in notification emails.
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: String::new(),
            login_url: default_login_url(),
        }
    }
}

fn default_login_url() -> String {
    "http://localhost/login".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

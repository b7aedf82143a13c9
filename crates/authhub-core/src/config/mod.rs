//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate, with `AUTHHUB_`-prefixed environment variables layered
//! on top (`__` separates nesting levels, e.g.
//! `AUTHHUB_AUTH__JWT_SECRET`). Each sub-module represents a logical
//! configuration section.
//! The merged [`AppConfig`] is constructed once at process start and passed
//! by reference to every component that needs it.

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod command;
pub mod database;
pub mod logging;
pub mod mail;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, TrustMode};
pub use self::bootstrap::BootstrapConfig;
pub use self::command::CommandConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::mail::MailConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Internal command transport settings.
    #[serde(default)]
    pub command: CommandConfig,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// First-run seed settings.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `AUTHHUB_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AUTHHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Validate settings that must be present for the process to run.
    ///
    /// The token signing secret has no usable default: an empty secret is a
    /// fatal startup fault, not something to limp along with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is not set; refusing to start without a signing secret",
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::configuration("database.url is not set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/authhub".into(),
                ..DatabaseConfig::default()
            },
            auth: AuthConfig::default(),
            command: CommandConfig::default(),
            mail: MailConfig::default(),
            bootstrap: BootstrapConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn missing_signing_secret_is_fatal() {
        let config = minimal();
        assert!(config.auth.jwt_secret.is_empty());
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert!(err.message.contains("jwt_secret"));
    }

    #[test]
    fn populated_secret_passes_validation() {
        let mut config = minimal();
        config.auth.jwt_secret = "test-secret".into();
        assert!(config.validate().is_ok());
    }
}

//! Internal command transport configuration.

use serde::{Deserialize, Serialize};

/// TCP command/reply transport configuration.
///
/// This transport is for service-to-service calls inside the deployment;
/// it is not meant to be exposed publicly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Whether the command listener is started.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3011
}

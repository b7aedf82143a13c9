//! First-run seed configuration.

use serde::{Deserialize, Serialize};

/// Settings for the idempotent first-run seed of roles, permissions,
/// modules, the default company, and the bootstrap admin user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Email of the bootstrap admin user.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Initial password of the bootstrap admin user.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Company the bootstrap admin belongs to.
    #[serde(default = "default_company")]
    pub company: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            company: default_company(),
        }
    }
}

fn default_admin_email() -> String {
    "admin@authhub.local".to_string()
}

fn default_admin_password() -> String {
    "ChangeMe.2024".to_string()
}

fn default_company() -> String {
    "AuthHub".to_string()
}

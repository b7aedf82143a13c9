//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). No default — an empty
    /// secret fails [`crate::config::AppConfig::validate`].
    #[serde(default)]
    pub jwt_secret: String,
    /// Token TTL in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// How token validation treats the embedded snapshot.
    #[serde(default)]
    pub trust_mode: TrustMode,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl(),
            trust_mode: TrustMode::default(),
        }
    }
}

/// Whether token validation trusts the snapshot embedded in the token or
/// re-verifies against the live user record.
///
/// Tokens are stateless and cannot be revoked, so `Reverify` is the only
/// mode in which deactivating a user takes effect before token expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustMode {
    /// Re-fetch the user by id on every validation (default).
    #[default]
    Reverify,
    /// Serve the snapshot carried in the token without a store round-trip.
    TrustToken,
}

fn default_token_ttl() -> u64 {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_mode_defaults_to_reverify() {
        assert_eq!(AuthConfig::default().trust_mode, TrustMode::Reverify);
    }

    #[test]
    fn trust_mode_deserializes_snake_case() {
        let mode: TrustMode = serde_json::from_str("\"trust_token\"").unwrap();
        assert_eq!(mode, TrustMode::TrustToken);
    }
}

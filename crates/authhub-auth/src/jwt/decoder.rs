//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use authhub_core::config::AuthConfig;
use authhub_core::error::AppError;

use super::claims::Claims;

/// Scheme prefix accepted (and stripped) on both transports.
const BEARER_PREFIX: &str = "Bearer ";

/// Validates bearer tokens.
///
/// Both transports use this same decoder, so a token accepted over HTTP is
/// accepted over the command transport and vice versa; only the way the
/// failure is communicated differs.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock-skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// An optional `Bearer ` scheme prefix is stripped first. Signature
    /// mismatch and malformed structure fail with an invalid-token error;
    /// expiry fails with an expiry-specific error. Neither is retried.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token = Self::strip_scheme(token);

        if token.is_empty() {
            return Err(AppError::unauthorized("Token is required"));
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized("Invalid token"),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Strips the bearer scheme label, if present.
    fn strip_scheme(token: &str) -> &str {
        token
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(token)
            .trim()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use authhub_core::config::AuthConfig;
    use authhub_core::error::ErrorKind;
    use authhub_entity::user::UserProfile;

    use crate::jwt::claims::Claims;
    use crate::jwt::encoder::JwtEncoder;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".into(),
            token_ttl_hours: 1,
            ..AuthConfig::default()
        }
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            phone: None,
            company: "Navy".into(),
            is_active: true,
            is_admin: true,
            is_super_admin: false,
            is_new_user: false,
            roles: vec![],
            permissions: vec![],
            modules: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn round_trip_recovers_the_snapshot() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let profile = sample_profile();

        let issued = encoder.issue(&profile).unwrap();
        let claims = decoder.decode(&issued.token).unwrap();

        assert_eq!(claims.sub, profile.id);
        assert_eq!(claims.user, profile);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let issued = encoder.issue(&sample_profile()).unwrap();
        let claims = decoder.decode(&format!("Bearer {}", issued.token)).unwrap();
        assert_eq!(claims.user.email, "grace@example.com");
    }

    #[test]
    fn expired_token_fails_with_expiry_error() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config);

        let now = Utc::now().timestamp();
        let profile = sample_profile();
        let claims = Claims {
            sub: profile.id,
            user: profile,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = decoder.decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(err.message.contains("expired"));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let other = AuthConfig {
            jwt_secret: "another-secret".into(),
            ..test_config()
        };
        let decoder = JwtDecoder::new(&other);

        let issued = encoder.issue(&sample_profile()).unwrap();
        let err = decoder.decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(!err.message.contains("expired"));
    }

    #[test]
    fn empty_token_is_rejected() {
        let decoder = JwtDecoder::new(&test_config());
        assert!(decoder.decode("").is_err());
        assert!(decoder.decode("Bearer ").is_err());
    }
}

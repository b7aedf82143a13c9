//! JWT claims: the flattened user snapshot plus standard time claims.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authhub_entity::user::UserProfile;

/// Claims payload embedded in every issued token.
///
/// The whole public user profile — identity fields, activity/admin flags,
/// and the role/permission/module snapshots — is flattened into the claims
/// so authorization checks need no store round-trip in `trust_token` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Flattened user snapshot at issuance time.
    #[serde(flatten)]
    pub user: UserProfile,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

//! Session audit record model.
//!
//! One row is written per successful login and never read back by the
//! business flows; it exists purely as an audit trail. Writing it must
//! never gate the login itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An audit record of a successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The authenticated user.
    pub user_id: Uuid,
    /// Denormalized display name at login time.
    pub user_name: String,
    /// Denormalized email at login time.
    pub email: String,
    /// Denormalized company at login time.
    pub company: String,
    /// When the issued token expires.
    pub expires_at: DateTime<Utc>,
    /// Client IP address, as reported by the transport.
    pub ip: Option<String>,
    /// Operating system family.
    pub os: Option<String>,
    /// Operating system version.
    pub os_version: Option<String>,
    /// Browser family.
    pub browser: Option<String>,
    /// Browser version.
    pub browser_version: Option<String>,
    /// Raw User-Agent header.
    pub user_agent: Option<String>,
    /// Device-class flag: phone.
    pub is_mobile: bool,
    /// Device-class flag: tablet.
    pub is_tablet: bool,
    /// Device-class flag: desktop browser.
    pub is_browser: bool,
    /// Kept for symmetry with other records; sessions are never mutated.
    pub is_active: bool,
    /// Login time.
    pub created_at: DateTime<Utc>,
}

/// Client fingerprint supplied with a login request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMeta {
    /// Client IP address.
    pub ip: Option<String>,
    /// Operating system family.
    pub os: Option<String>,
    /// Operating system version.
    pub os_version: Option<String>,
    /// Browser family.
    pub browser: Option<String>,
    /// Browser version.
    pub browser_version: Option<String>,
    /// Raw User-Agent string.
    pub user_agent: Option<String>,
    /// Device-class flag: phone.
    #[serde(default)]
    pub is_mobile: bool,
    /// Device-class flag: tablet.
    #[serde(default)]
    pub is_tablet: bool,
    /// Device-class flag: desktop browser.
    #[serde(default)]
    pub is_browser: bool,
}

/// Data required to record a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The authenticated user.
    pub user_id: Uuid,
    /// Denormalized display name.
    pub user_name: String,
    /// Denormalized email.
    pub email: String,
    /// Denormalized company.
    pub company: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// Client fingerprint.
    pub client: ClientMeta,
}

//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::snapshot::{ModuleSnapshot, PermissionSnapshot, RoleSnapshot};

/// An authenticable user with embedded authorization snapshots.
///
/// The snapshot collections are JSONB columns on the user row, so the row
/// is the unit of atomic update for grants and password changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Given name.
    pub name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address, the login identity.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Company (tenant) the user belongs to.
    pub company: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Only active users can authenticate.
    pub is_active: bool,
    /// Administrator within the user's company.
    pub is_admin: bool,
    /// Cross-tenant administrator; sees every company.
    pub is_super_admin: bool,
    /// Must change password on next use (set on creation and recovery).
    pub is_new_user: bool,
    /// Role copies granted to this user.
    #[sqlx(json)]
    pub roles: Vec<RoleSnapshot>,
    /// Directly granted permission copies (bypass role membership).
    #[sqlx(json)]
    pub permissions: Vec<PermissionSnapshot>,
    /// Module copies granted to this user.
    #[sqlx(json)]
    pub modules: Vec<ModuleSnapshot>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The public view of this user (everything except the secret hash).
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }

    /// `"name lastName"` for display and mail salutations.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// The public view of a user: identity fields, flags, and snapshots, with
/// the secret hash stripped. This is what login payloads, validation
/// replies, and token claims carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: Uuid,
    /// Given name.
    pub name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Company (tenant).
    pub company: String,
    /// Active flag.
    pub is_active: bool,
    /// Company administrator flag.
    pub is_admin: bool,
    /// Cross-tenant administrator flag.
    pub is_super_admin: bool,
    /// Must-change-password flag.
    pub is_new_user: bool,
    /// Role copies.
    pub roles: Vec<RoleSnapshot>,
    /// Direct permission copies.
    pub permissions: Vec<PermissionSnapshot>,
    /// Module copies.
    pub modules: Vec<ModuleSnapshot>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            company: user.company.clone(),
            is_active: user.is_active,
            is_admin: user.is_admin,
            is_super_admin: user.is_super_admin,
            is_new_user: user.is_new_user,
            roles: user.roles.clone(),
            permissions: user.permissions.clone(),
            modules: user.modules.clone(),
            created_at: user.created_at,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Given name.
    pub name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Company (tenant).
    pub company: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Company administrator flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Cross-tenant administrator flag.
    #[serde(default)]
    pub is_super_admin: bool,
    /// Role copies to grant at creation.
    #[serde(default)]
    pub roles: Vec<RoleSnapshot>,
    /// Direct permission copies to grant at creation.
    #[serde(default)]
    pub permissions: Vec<PermissionSnapshot>,
    /// Module copies to grant at creation.
    #[serde(default)]
    pub modules: Vec<ModuleSnapshot>,
}

/// Data for updating an existing user's profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New given name.
    pub name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New company.
    pub company: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New company-admin flag.
    pub is_admin: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
            company: "Analytical Engines".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            is_active: true,
            is_admin: false,
            is_super_admin: false,
            is_new_user: true,
            roles: vec![],
            permissions: vec![],
            modules: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn serialized_user_never_carries_the_hash() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn profile_copies_identity_and_flags() {
        let user = sample_user();
        let profile = user.profile();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.company, user.company);
        assert!(profile.is_new_user);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}

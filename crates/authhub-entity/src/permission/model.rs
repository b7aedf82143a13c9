//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A grantable permission.
///
/// The `action` is an open vocabulary (`create`, `read`, `update`,
/// `delete`, ...) matched case-insensitively by the decision engine; it is
/// unique across the table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// What the permission allows, for humans.
    pub description: String,
    /// The action this permission grants (unique, open vocabulary).
    pub action: String,
    /// Resource family the action applies to.
    pub resource: String,
    /// Specific resource instance, when the grant is that narrow.
    pub resource_id: Option<String>,
    /// Whether the permission is global or bound to roles.
    pub kind: PermissionKind,
    /// Inactive permissions grant nothing.
    pub is_active: bool,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
    /// When the permission was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Scope discriminator for a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "permission_kind", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PermissionKind {
    /// Grantable directly to users.
    Global,
    /// Grantable through role membership.
    RoleBased,
}

/// Data required to create a new permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// Unique display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Unique action tag.
    pub action: String,
    /// Resource family.
    pub resource: String,
    /// Specific resource instance.
    pub resource_id: Option<String>,
    /// Scope discriminator.
    pub kind: PermissionKind,
}

/// Data for updating an existing permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePermission {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New resource family.
    pub resource: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

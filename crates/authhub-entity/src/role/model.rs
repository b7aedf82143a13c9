//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::snapshot::PermissionSnapshot;

/// A canonical role.
///
/// Roles bundle permission snapshots; granting a role to a user copies the
/// whole role (including its embedded permissions) into the user row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name.
    pub name: String,
    /// Unique short code (e.g. `ADM`).
    pub code: String,
    /// What the role is for.
    pub description: String,
    /// Inactive roles grant nothing, regardless of embedded permissions.
    pub is_active: bool,
    /// Carried for forward compatibility; not evaluated by the decision
    /// engine.
    pub is_inherit_permissions: bool,
    /// Permission copies embedded at role assembly time.
    #[sqlx(json)]
    pub permissions: Vec<PermissionSnapshot>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Unique role name.
    pub name: String,
    /// Unique short code.
    pub code: String,
    /// Description.
    pub description: String,
    /// Inheritance flag (carried, not evaluated).
    #[serde(default)]
    pub is_inherit_permissions: bool,
    /// Permission copies to embed.
    #[serde(default)]
    pub permissions: Vec<PermissionSnapshot>,
}

/// Data for updating an existing role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRole {
    /// New role name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// Replacement permission copies.
    pub permissions: Option<Vec<PermissionSnapshot>>,
}

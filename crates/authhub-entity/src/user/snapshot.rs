//! Embedded authorization snapshots.
//!
//! A snapshot is a point-in-time copy of a canonical record, embedded into
//! a user row (and from there into issued tokens). The `From` conversions
//! in this module are the only way snapshots are produced, so every grant
//! is a copy-at-grant-time: editing the canonical record later does not
//! touch users that already hold a snapshot of it. Refreshing a user's
//! snapshots requires an explicit re-grant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::module::{Module, Route};
use crate::permission::Permission;
use crate::role::Role;

/// Copy of a role at grant time, including its permission copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSnapshot {
    /// Id of the canonical role.
    pub id: Uuid,
    /// Role name at grant time.
    pub name: String,
    /// Role code at grant time.
    pub code: String,
    /// Role description at grant time.
    pub description: String,
    /// Active flag at grant time; inactive roles grant nothing.
    pub is_active: bool,
    /// Carried for forward compatibility; not evaluated by the decision
    /// engine.
    pub is_inherit_permissions: bool,
    /// Permission copies embedded in the role at grant time.
    pub permissions: Vec<PermissionSnapshot>,
}

/// Copy of a permission at grant time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    /// Id of the canonical permission.
    pub id: Uuid,
    /// Permission name at grant time.
    pub name: String,
    /// Permission description at grant time.
    pub description: String,
    /// Action tag at grant time.
    pub action: String,
    /// Active flag at grant time; inactive permissions grant nothing.
    pub is_active: bool,
}

/// Copy of a module at grant time, including its navigation routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    /// Id of the canonical module.
    pub id: Uuid,
    /// Module name at grant time.
    pub name: String,
    /// Module description at grant time.
    pub description: String,
    /// Active flag at grant time.
    pub is_active: bool,
    /// Whether this is a built-in module.
    pub is_system_module: bool,
    /// Navigation route tree at grant time.
    pub routes: Vec<Route>,
}

impl From<&Role> for RoleSnapshot {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            code: role.code.clone(),
            description: role.description.clone(),
            is_active: role.is_active,
            is_inherit_permissions: role.is_inherit_permissions,
            permissions: role.permissions.clone(),
        }
    }
}

impl From<&Permission> for PermissionSnapshot {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name.clone(),
            description: permission.description.clone(),
            action: permission.action.clone(),
            is_active: permission.is_active,
        }
    }
}

impl From<&Module> for ModuleSnapshot {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id,
            name: module.name.clone(),
            description: module.description.clone(),
            is_active: module.is_active,
            is_system_module: module.is_system_module,
            routes: module.routes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::permission::PermissionKind;

    fn sample_permission() -> Permission {
        Permission {
            id: Uuid::new_v4(),
            name: "Create".into(),
            description: "Allows creating records".into(),
            action: "create".into(),
            resource: "users".into(),
            resource_id: None,
            kind: PermissionKind::RoleBased,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn permission_snapshot_copies_grant_fields() {
        let canonical = sample_permission();
        let snapshot = PermissionSnapshot::from(&canonical);
        assert_eq!(snapshot.id, canonical.id);
        assert_eq!(snapshot.action, "create");
        assert!(snapshot.is_active);
    }

    #[test]
    fn snapshot_does_not_track_later_edits() {
        let mut canonical = sample_permission();
        let snapshot = PermissionSnapshot::from(&canonical);
        canonical.action = "destroy".into();
        canonical.is_active = false;
        assert_eq!(snapshot.action, "create");
        assert!(snapshot.is_active);
    }
}

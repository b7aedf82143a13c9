//! The permission decision engine.
//!
//! A pure existential match over the snapshots a user carries: active
//! roles contribute their active embedded permissions, then the directly
//! granted permissions are consulted. Absence of permission is an ordinary
//! `false`, never an error, so the function is safe to call from any
//! number of concurrent requests.

use authhub_entity::user::{PermissionSnapshot, RoleSnapshot, User, UserProfile};

use crate::jwt::Claims;

/// Decides whether the given snapshots allow `action`.
///
/// Rules:
/// 1. No roles and no direct permissions → deny.
/// 2. Inactive roles are skipped entirely; they contribute nothing.
/// 3. A permission grants iff it is active and its `action` equals the
///    requested action case-insensitively.
/// 4. Role permissions are consulted first, then the direct list; the
///    order of entries never affects the outcome.
///
/// No wildcard or hierarchy matching: `update` does not imply `read`.
pub fn can_perform(roles: &[RoleSnapshot], direct: &[PermissionSnapshot], action: &str) -> bool {
    if roles.is_empty() && direct.is_empty() {
        return false;
    }

    for role in roles {
        if !role.is_active {
            continue;
        }
        for permission in &role.permissions {
            if permission.is_active && permission.action.eq_ignore_ascii_case(action) {
                return true;
            }
        }
    }

    direct
        .iter()
        .any(|p| p.is_active && p.action.eq_ignore_ascii_case(action))
}

/// Anything that carries authorization snapshots and can be asked for a
/// permission decision: the live user record, its public profile, and the
/// claims recovered from a token all answer identically.
pub trait Authorizable {
    /// Granted role snapshots.
    fn granted_roles(&self) -> &[RoleSnapshot];

    /// Directly granted permission snapshots.
    fn direct_permissions(&self) -> &[PermissionSnapshot];

    /// Whether this principal may perform `action`.
    fn can_perform(&self, action: &str) -> bool {
        can_perform(self.granted_roles(), self.direct_permissions(), action)
    }
}

impl Authorizable for User {
    fn granted_roles(&self) -> &[RoleSnapshot] {
        &self.roles
    }

    fn direct_permissions(&self) -> &[PermissionSnapshot] {
        &self.permissions
    }
}

impl Authorizable for UserProfile {
    fn granted_roles(&self) -> &[RoleSnapshot] {
        &self.roles
    }

    fn direct_permissions(&self) -> &[PermissionSnapshot] {
        &self.permissions
    }
}

impl Authorizable for Claims {
    fn granted_roles(&self) -> &[RoleSnapshot] {
        &self.user.roles
    }

    fn direct_permissions(&self) -> &[PermissionSnapshot] {
        &self.user.permissions
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn permission(action: &str, is_active: bool) -> PermissionSnapshot {
        PermissionSnapshot {
            id: Uuid::new_v4(),
            name: action.to_string(),
            description: String::new(),
            action: action.to_string(),
            is_active,
        }
    }

    fn role(code: &str, is_active: bool, permissions: Vec<PermissionSnapshot>) -> RoleSnapshot {
        RoleSnapshot {
            id: Uuid::new_v4(),
            name: code.to_string(),
            code: code.to_string(),
            description: String::new(),
            is_active,
            is_inherit_permissions: false,
            permissions,
        }
    }

    #[test]
    fn no_roles_and_no_permissions_denies_everything() {
        assert!(!can_perform(&[], &[], "create"));
        assert!(!can_perform(&[], &[], "read"));
    }

    #[test]
    fn role_with_matching_active_permission_grants() {
        let roles = vec![role("ADM", true, vec![permission("create", true)])];
        assert!(can_perform(&roles, &[], "create"));
        assert!(!can_perform(&roles, &[], "delete"));
    }

    #[test]
    fn inactive_role_contributes_nothing() {
        let roles = vec![role("ADM", false, vec![permission("create", true)])];
        assert!(!can_perform(&roles, &[], "create"));
    }

    #[test]
    fn inactive_permission_inside_active_role_does_not_grant() {
        let roles = vec![role("ADM", true, vec![permission("create", false)])];
        assert!(!can_perform(&roles, &[], "create"));
    }

    #[test]
    fn direct_permission_grants_without_any_role() {
        let direct = vec![permission("read", true)];
        assert!(can_perform(&[], &direct, "read"));
        assert!(!can_perform(&[], &direct, "update"));
    }

    #[test]
    fn inactive_direct_permission_does_not_grant() {
        let direct = vec![permission("delete", false)];
        assert!(!can_perform(&[], &direct, "delete"));
    }

    #[test]
    fn action_matching_is_case_insensitive() {
        let roles = vec![role("ADM", true, vec![permission("create", true)])];
        assert_eq!(
            can_perform(&roles, &[], "Create"),
            can_perform(&roles, &[], "create")
        );
        assert!(can_perform(&roles, &[], "CREATE"));

        let direct = vec![permission("Read", true)];
        assert!(can_perform(&[], &direct, "read"));
    }

    #[test]
    fn order_of_roles_does_not_change_the_outcome() {
        let granting = role("ADM", true, vec![permission("update", true)]);
        let inert = role("AUD", true, vec![permission("read", true)]);

        let forward = vec![granting.clone(), inert.clone()];
        let backward = vec![inert, granting];
        assert_eq!(
            can_perform(&forward, &[], "update"),
            can_perform(&backward, &[], "update")
        );
    }

    #[test]
    fn no_hierarchy_between_actions() {
        let roles = vec![role("EDT", true, vec![permission("update", true)])];
        assert!(can_perform(&roles, &[], "update"));
        assert!(!can_perform(&roles, &[], "read"));
    }
}

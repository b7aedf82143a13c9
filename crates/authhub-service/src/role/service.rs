//! Role catalog management.

use std::sync::Arc;

use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_database::repositories::{PermissionRepository, RoleRepository};
use authhub_entity::role::model::{CreateRole, UpdateRole};
use authhub_entity::role::Role;
use authhub_entity::user::PermissionSnapshot;

/// Input for role creation: embedded permissions are chosen by canonical
/// id and copied into the role as snapshots.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewRole {
    /// Unique role name.
    pub name: String,
    /// Unique short code.
    pub code: String,
    /// Description.
    pub description: String,
    /// Inheritance flag (carried, not evaluated).
    #[serde(default)]
    pub is_inherit_permissions: bool,
    /// Permissions to embed.
    #[serde(default)]
    pub permission_ids: Vec<Uuid>,
}

/// Manages the canonical role catalog.
#[derive(Clone)]
pub struct RoleService {
    roles: Arc<RoleRepository>,
    permissions: Arc<PermissionRepository>,
}

impl RoleService {
    /// Wire the role flows to their repositories.
    pub fn new(roles: Arc<RoleRepository>, permissions: Arc<PermissionRepository>) -> Self {
        Self { roles, permissions }
    }

    /// Creates a role, embedding copies of the chosen permissions.
    pub async fn create(&self, input: NewRole) -> AppResult<Role> {
        let permissions = if input.permission_ids.is_empty() {
            vec![]
        } else {
            let found = self.permissions.find_by_ids(&input.permission_ids).await?;
            if found.len() != input.permission_ids.len() {
                return Err(AppError::not_found("One or more permissions not found"));
            }
            found.iter().map(PermissionSnapshot::from).collect()
        };

        self.roles
            .create(&CreateRole {
                name: input.name,
                code: input.code,
                description: input.description,
                is_inherit_permissions: input.is_inherit_permissions,
                permissions,
            })
            .await
    }

    /// Lists all roles.
    pub async fn find_all(&self) -> AppResult<Vec<Role>> {
        self.roles.find_all().await
    }

    /// Fetches a role by id.
    pub async fn get(&self, id: Uuid) -> AppResult<Role> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))
    }

    /// Updates a role's fields.
    pub async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Role> {
        self.roles.update(id, data).await
    }

    /// Deletes a role.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.roles.delete(id).await? {
            return Err(AppError::not_found(format!("Role {id} not found")));
        }
        Ok(())
    }
}

//! Permission catalog management.

use std::sync::Arc;

use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_database::repositories::PermissionRepository;
use authhub_entity::permission::model::{CreatePermission, UpdatePermission};
use authhub_entity::permission::Permission;

/// Manages the canonical permission catalog.
#[derive(Clone)]
pub struct PermissionService {
    permissions: Arc<PermissionRepository>,
}

impl PermissionService {
    /// Wire the permission flows to their repository.
    pub fn new(permissions: Arc<PermissionRepository>) -> Self {
        Self { permissions }
    }

    /// Creates a permission; duplicate name or action is a conflict.
    pub async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        self.permissions.create(data).await
    }

    /// Lists all permissions.
    pub async fn find_all(&self) -> AppResult<Vec<Permission>> {
        self.permissions.find_all().await
    }

    /// Fetches a permission by id.
    pub async fn get(&self, id: Uuid) -> AppResult<Permission> {
        self.permissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Permission {id} not found")))
    }

    /// Updates a permission's fields.
    pub async fn update(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Permission> {
        self.permissions.update(id, data).await
    }

    /// Deletes a permission.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.permissions.delete(id).await? {
            return Err(AppError::not_found(format!("Permission {id} not found")));
        }
        Ok(())
    }
}

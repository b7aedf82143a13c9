//! User CRUD, tenant-scoped listing, and snapshot re-grants.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use authhub_auth::password::PasswordHasher;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::types::pagination::{PageRequest, PageResponse};
use authhub_database::repositories::{
    ModuleRepository, PermissionRepository, RoleRepository, UserRepository,
};
use authhub_entity::user::model::{CreateUser, UpdateUser};
use authhub_entity::user::{
    ModuleSnapshot, PermissionSnapshot, RoleSnapshot, User, UserProfile,
};

use crate::mail::{self, Mailer, template};

/// Provisioning input for a new user. Grants are given as canonical ids
/// and copied into snapshots at creation time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewUser {
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
    /// Initial plaintext password; hashed before storage.
    pub password: String,
    /// Company administrator flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Cross-tenant administrator flag.
    #[serde(default)]
    pub is_super_admin: bool,
    /// Roles to grant at creation.
    #[serde(default)]
    pub role_ids: Vec<Uuid>,
    /// Direct permissions to grant at creation.
    #[serde(default)]
    pub permission_ids: Vec<Uuid>,
    /// Modules to grant at creation.
    #[serde(default)]
    pub module_ids: Vec<Uuid>,
}

/// Orchestrates user management on top of the repositories.
#[derive(Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    roles: Arc<RoleRepository>,
    permissions: Arc<PermissionRepository>,
    modules: Arc<ModuleRepository>,
    hasher: PasswordHasher,
    mailer: Arc<dyn Mailer>,
    login_url: String,
}

impl UserService {
    /// Wire the user flows to their collaborators.
    pub fn new(
        users: Arc<UserRepository>,
        roles: Arc<RoleRepository>,
        permissions: Arc<PermissionRepository>,
        modules: Arc<ModuleRepository>,
        mailer: Arc<dyn Mailer>,
        login_url: String,
    ) -> Self {
        Self {
            users,
            roles,
            permissions,
            modules,
            hasher: PasswordHasher::new(),
            mailer,
            login_url,
        }
    }

    /// Creates a user: hashes the password, copies the requested grants
    /// into snapshots, persists, and dispatches a welcome email.
    pub async fn create(&self, input: NewUser) -> AppResult<User> {
        let password_hash = self.hasher.hash_password(&input.password)?;

        let data = CreateUser {
            name: input.name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            password_hash,
            is_admin: input.is_admin,
            is_super_admin: input.is_super_admin,
            roles: self.role_snapshots(&input.role_ids).await?,
            permissions: self.permission_snapshots(&input.permission_ids).await?,
            modules: self.module_snapshots(&input.module_ids).await?,
        };

        let user = self.users.create(&data).await?;

        mail::mailer::dispatch(
            Arc::clone(&self.mailer),
            template::welcome(
                &user.email,
                &user.name,
                &user.email,
                &input.password,
                &self.login_url,
            ),
        );

        info!(user_id = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Lists users with pagination and optional global search, scoped to
    /// the requestor's company unless the requestor is a superadmin.
    pub async fn find_by_page(
        &self,
        requestor: &UserProfile,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let scope = if requestor.is_super_admin {
            None
        } else {
            Some(requestor.company.as_str())
        };
        self.users.find_by_page(scope, search, page).await
    }

    /// Lists users across every tenant. Reserved for the internal command
    /// transport, which is trusted end-to-end.
    pub async fn find_by_page_any(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.users.find_by_page(None, search, page).await
    }

    /// Fetches a user by id.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Updates profile fields.
    pub async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        self.users.update(id, data).await
    }

    /// Deletes a user.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.users.delete(id).await? {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Re-grants roles: copies the canonical roles into fresh snapshots.
    pub async fn assign_roles(&self, user_id: Uuid, role_ids: &[Uuid]) -> AppResult<User> {
        let snapshots = self.role_snapshots(role_ids).await?;
        self.users.set_roles(user_id, &snapshots).await
    }

    /// Re-grants direct permissions.
    pub async fn assign_permissions(
        &self,
        user_id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<User> {
        let snapshots = self.permission_snapshots(permission_ids).await?;
        self.users.set_permissions(user_id, &snapshots).await
    }

    /// Re-grants modules.
    pub async fn assign_modules(&self, user_id: Uuid, module_ids: &[Uuid]) -> AppResult<User> {
        let snapshots = self.module_snapshots(module_ids).await?;
        self.users.set_modules(user_id, &snapshots).await
    }

    async fn role_snapshots(&self, ids: &[Uuid]) -> AppResult<Vec<RoleSnapshot>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let roles = self.roles.find_by_ids(ids).await?;
        if roles.len() != ids.len() {
            return Err(AppError::not_found("One or more roles not found"));
        }
        Ok(roles.iter().map(RoleSnapshot::from).collect())
    }

    async fn permission_snapshots(&self, ids: &[Uuid]) -> AppResult<Vec<PermissionSnapshot>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let permissions = self.permissions.find_by_ids(ids).await?;
        if permissions.len() != ids.len() {
            return Err(AppError::not_found("One or more permissions not found"));
        }
        Ok(permissions.iter().map(PermissionSnapshot::from).collect())
    }

    async fn module_snapshots(&self, ids: &[Uuid]) -> AppResult<Vec<ModuleSnapshot>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let modules = self.modules.find_by_ids(ids).await?;
        if modules.len() != ids.len() {
            return Err(AppError::not_found("One or more modules not found"));
        }
        Ok(modules.iter().map(ModuleSnapshot::from).collect())
    }
}

//! Request DTOs with input validation.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use authhub_entity::module::Route;
use authhub_entity::permission::PermissionKind;
use authhub_entity::session::model::ClientMeta;
use authhub_service::role::NewRole;
use authhub_service::user::NewUser;

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
    /// Optional client fingerprint for the session audit record.
    #[serde(default)]
    pub meta: Option<ClientMeta>,
}

/// Change-password request body.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// User to change.
    pub id: Uuid,
    /// Current password, verified before any write.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// Replacement password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Recovery-password request body.
#[derive(Debug, Deserialize, Validate)]
pub struct RecoveryPasswordRequest {
    /// Email of the account to recover.
    #[validate(email)]
    pub email: String,
}

/// User-creation request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Given name.
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    /// Family name.
    #[validate(length(min = 3, max = 100))]
    pub last_name: String,
    /// Unique email address.
    #[validate(email)]
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Company (tenant).
    #[validate(length(min = 1))]
    pub company: String,
    /// Initial password.
    #[validate(length(min = 8))]
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

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            name: req.name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            company: req.company,
            password: req.password,
            is_admin: req.is_admin,
            is_super_admin: req.is_super_admin,
            role_ids: req.role_ids,
            permission_ids: req.permission_ids,
            module_ids: req.module_ids,
        }
    }
}

/// Grant re-assignment body: the full replacement id set.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    /// Canonical record ids to copy into snapshots.
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

/// Role-creation request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Unique role name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Unique short code.
    #[validate(length(min = 2, max = 10))]
    pub code: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Inheritance flag (carried, not evaluated).
    #[serde(default)]
    pub is_inherit_permissions: bool,
    /// Permissions to embed.
    #[serde(default)]
    pub permission_ids: Vec<Uuid>,
}

impl From<CreateRoleRequest> for NewRole {
    fn from(req: CreateRoleRequest) -> Self {
        NewRole {
            name: req.name,
            code: req.code,
            description: req.description,
            is_inherit_permissions: req.is_inherit_permissions,
            permission_ids: req.permission_ids,
        }
    }
}

/// Permission-creation request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePermissionRequest {
    /// Unique display name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Unique action tag.
    #[validate(length(min = 1))]
    pub action: String,
    /// Resource family.
    #[validate(length(min = 1))]
    pub resource: String,
    /// Specific resource instance.
    pub resource_id: Option<String>,
    /// Scope discriminator.
    pub kind: PermissionKind,
}

/// Module-creation request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateModuleRequest {
    /// Unique module name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Built-in flag.
    #[serde(default)]
    pub is_system_module: bool,
    /// Navigation route tree.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// Company-creation request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    /// Unique company name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Legal representative.
    pub legal_representative: Option<String>,
    /// Tax identifier.
    pub tax_id: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    #[validate(email)]
    pub email: Option<String>,
    /// Website URL.
    pub web: Option<String>,
}

/// Pagination and search query parameters for user listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
    /// Global text search across identity fields.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_rejects_malformed_email() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: "x".into(),
            meta: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn change_password_requires_a_long_enough_replacement() {
        let req = ChangePasswordRequest {
            id: Uuid::new_v4(),
            current_password: "old".into(),
            new_password: "short".into(),
        };
        assert!(req.validate().is_err());
    }
}

//! Application state shared across all handlers.

use std::sync::Arc;

use authhub_core::config::AppConfig;
use authhub_service::auth::AuthService;
use authhub_service::company::CompanyService;
use authhub_service::module::ModuleService;
use authhub_service::permission::PermissionService;
use authhub_service::role::RoleService;
use authhub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Authentication flows.
    pub auth_service: Arc<AuthService>,
    /// User management flows.
    pub user_service: Arc<UserService>,
    /// Role catalog flows.
    pub role_service: Arc<RoleService>,
    /// Permission catalog flows.
    pub permission_service: Arc<PermissionService>,
    /// Module catalog flows.
    pub module_service: Arc<ModuleService>,
    /// Company catalog flows.
    pub company_service: Arc<CompanyService>,
}

//! First-run data seeding.
//!
//! On startup, each catalog table that is empty gets its default records;
//! a bootstrap admin user is created when no user exists at all. Every
//! insert carries `ON CONFLICT DO NOTHING`, so racing instances and
//! partially seeded stores are fine: duplicates are swallowed, not
//! reported, and partial success is acceptable.

use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{info, warn};

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::module::{Module, Route};
use authhub_entity::permission::{Permission, PermissionKind};
use authhub_entity::role::Role;
use authhub_entity::user::{ModuleSnapshot, PermissionSnapshot, RoleSnapshot};

/// Bootstrap admin identity, assembled by the caller from configuration
/// (the password arrives pre-hashed).
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    /// Given name.
    pub name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Argon2 hash of the initial password.
    pub password_hash: String,
    /// Company the admin belongs to.
    pub company: String,
}

/// Default permission set: (name, description, action, resource).
fn default_permissions() -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
    vec![
        ("Create", "Allows registering new records", "create", "all"),
        ("Read", "Allows reading records", "read", "all"),
        ("Update", "Allows editing existing records", "update", "all"),
        ("Delete", "Allows removing records", "delete", "all"),
        ("Export", "Allows exporting record sets", "export", "all"),
    ]
}

/// Default role set: (name, code, description, is_inherit_permissions).
fn default_roles() -> Vec<(&'static str, &'static str, &'static str, bool)> {
    vec![
        (
            "Administrator",
            "ADM",
            "Full system access with superuser privileges",
            false,
        ),
        (
            "Basic User",
            "USR",
            "Limited access to main system features",
            true,
        ),
        ("Auditor", "AUD", "Read-only access for record review", false),
    ]
}

/// The built-in administration module and its navigation tree.
fn admin_module_routes() -> Vec<Route> {
    vec![Route {
        name: "Pages".into(),
        path: "/pages".into(),
        init_path: Some("/pages/users".into()),
        icon: "dashboard".into(),
        is_active: true,
        children: vec![
            leaf_route("Users", "/users", "users"),
            leaf_route("Roles", "/roles", "unlock"),
            leaf_route("Permissions", "/permissions", "key"),
            leaf_route("Modules", "/modules", "directions"),
            leaf_route("Companies", "/companies", "briefcase"),
        ],
    }]
}

fn leaf_route(name: &str, path: &str, icon: &str) -> Route {
    Route {
        name: name.into(),
        path: path.into(),
        init_path: None,
        icon: icon.into(),
        is_active: true,
        children: vec![],
    }
}

/// Seed every empty table. Idempotent: running against a populated store
/// changes nothing and raises nothing.
pub async fn run(pool: &PgPool, admin: &SeedAdmin) -> AppResult<()> {
    if table_count(pool, "permissions").await? == 0 {
        warn!("No permissions found, seeding defaults");
        seed_permissions(pool).await?;
    }
    if table_count(pool, "roles").await? == 0 {
        warn!("No roles found, seeding defaults");
        seed_roles(pool).await?;
    }
    if table_count(pool, "modules").await? == 0 {
        warn!("No modules found, seeding the admin module");
        seed_modules(pool).await?;
    }
    if table_count(pool, "companies").await? == 0 {
        warn!("No companies found, seeding the default company");
        seed_company(pool, &admin.company).await?;
    }
    if table_count(pool, "users").await? == 0 {
        warn!("No users found, creating the bootstrap admin");
        seed_admin_user(pool, admin).await?;
    }
    Ok(())
}

async fn table_count(pool: &PgPool, table: &str) -> AppResult<i64> {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Failed to count {table}"), e)
        })
}

async fn seed_permissions(pool: &PgPool) -> AppResult<()> {
    for (name, description, action, resource) in default_permissions() {
        sqlx::query(
            "INSERT INTO permissions (name, description, action, resource, kind) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT DO NOTHING",
        )
        .bind(name)
        .bind(description)
        .bind(action)
        .bind(resource)
        .bind(PermissionKind::RoleBased)
        .execute(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed permission", e))?;
    }
    info!("Permissions initialized");
    Ok(())
}

async fn seed_roles(pool: &PgPool) -> AppResult<()> {
    // Every default role embeds a copy of the full permission set.
    let permissions = sqlx::query_as::<_, Permission>("SELECT * FROM permissions")
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load permissions", e))?;
    let snapshots: Vec<PermissionSnapshot> =
        permissions.iter().map(PermissionSnapshot::from).collect();

    for (name, code, description, is_inherit) in default_roles() {
        sqlx::query(
            "INSERT INTO roles (name, code, description, is_inherit_permissions, permissions) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT DO NOTHING",
        )
        .bind(name)
        .bind(code)
        .bind(description)
        .bind(is_inherit)
        .bind(Json(&snapshots))
        .execute(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed role", e))?;
    }
    info!("Roles initialized");
    Ok(())
}

async fn seed_modules(pool: &PgPool) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO modules (name, description, is_system_module, routes) \
         VALUES ($1, $2, TRUE, $3) \
         ON CONFLICT DO NOTHING",
    )
    .bind("adminUserModule")
    .bind("Module for admin user functionalities")
    .bind(Json(admin_module_routes()))
    .execute(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed module", e))?;
    info!("Modules initialized");
    Ok(())
}

async fn seed_company(pool: &PgPool, name: &str) -> AppResult<()> {
    sqlx::query("INSERT INTO companies (name) VALUES ($1) ON CONFLICT DO NOTHING")
        .bind(name)
        .execute(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed company", e))?;
    info!("Companies initialized");
    Ok(())
}

async fn seed_admin_user(pool: &PgPool, admin: &SeedAdmin) -> AppResult<()> {
    // The bootstrap admin gets everything that exists at this point.
    let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles")
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load roles", e))?;
    let permissions = sqlx::query_as::<_, Permission>("SELECT * FROM permissions")
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load permissions", e))?;
    let modules = sqlx::query_as::<_, Module>("SELECT * FROM modules")
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load modules", e))?;

    let role_snapshots: Vec<RoleSnapshot> = roles.iter().map(RoleSnapshot::from).collect();
    let permission_snapshots: Vec<PermissionSnapshot> =
        permissions.iter().map(PermissionSnapshot::from).collect();
    let module_snapshots: Vec<ModuleSnapshot> = modules.iter().map(ModuleSnapshot::from).collect();

    sqlx::query(
        "INSERT INTO users \
           (name, last_name, email, company, password_hash, \
            is_admin, is_super_admin, is_new_user, roles, permissions, modules) \
         VALUES ($1, $2, $3, $4, $5, TRUE, TRUE, FALSE, $6, $7, $8) \
         ON CONFLICT DO NOTHING",
    )
    .bind(&admin.name)
    .bind(&admin.last_name)
    .bind(&admin.email)
    .bind(&admin.company)
    .bind(&admin.password_hash)
    .bind(Json(&role_snapshots))
    .bind(Json(&permission_snapshots))
    .bind(Json(&module_snapshots))
    .execute(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed admin user", e))?;

    info!(email = %admin.email, "Bootstrap admin created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_permission_actions_are_unique() {
        let permissions = default_permissions();
        let mut actions: Vec<&str> = permissions.iter().map(|p| p.2).collect();
        actions.sort_unstable();
        actions.dedup();
        assert_eq!(actions.len(), permissions.len());
    }

    #[test]
    fn default_role_codes_are_unique() {
        let roles = default_roles();
        let mut codes: Vec<&str> = roles.iter().map(|r| r.1).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), roles.len());
        assert!(codes.contains(&"ADM"));
    }

    #[test]
    fn admin_module_tree_has_children() {
        let routes = admin_module_routes();
        assert_eq!(routes.len(), 1);
        assert!(routes[0].children.len() >= 4);
        assert!(routes[0].init_path.is_some());
    }
}

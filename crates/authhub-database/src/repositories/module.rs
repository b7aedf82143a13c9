//! Module repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::module::model::{CreateModule, UpdateModule};
use authhub_entity::module::Module;

/// Repository for canonical module records.
#[derive(Debug, Clone)]
pub struct ModuleRepository {
    pool: PgPool,
}

impl ModuleRepository {
    /// Create a new module repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a module by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Module>> {
        sqlx::query_as::<_, Module>("SELECT * FROM modules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find module by id", e)
            })
    }

    /// Find modules by a set of ids (for re-grants).
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Module>> {
        sqlx::query_as::<_, Module>("SELECT * FROM modules WHERE id = ANY($1) ORDER BY name ASC")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find modules", e))
    }

    /// List all modules.
    pub async fn find_all(&self) -> AppResult<Vec<Module>> {
        sqlx::query_as::<_, Module>("SELECT * FROM modules ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list modules", e))
    }

    /// Create a new module.
    pub async fn create(&self, data: &CreateModule) -> AppResult<Module> {
        sqlx::query_as::<_, Module>(
            "INSERT INTO modules (name, description, is_system_module, routes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.is_system_module)
        .bind(Json(&data.routes))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("modules_name_key") =>
            {
                AppError::conflict(format!("Module name '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create module", e),
        })
    }

    /// Update a module's fields.
    pub async fn update(&self, id: Uuid, data: &UpdateModule) -> AppResult<Module> {
        sqlx::query_as::<_, Module>(
            "UPDATE modules SET name = COALESCE($2, name), \
                                description = COALESCE($3, description), \
                                is_active = COALESCE($4, is_active), \
                                routes = COALESCE($5, routes), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.is_active)
        .bind(data.routes.as_ref().map(Json))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("modules_name_key") =>
            {
                AppError::conflict("Module name already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update module", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Module {id} not found")))
    }

    /// Delete a module by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete module", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total modules.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modules")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count modules", e)
            })?;
        Ok(count as u64)
    }
}

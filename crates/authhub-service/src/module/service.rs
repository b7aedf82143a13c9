//! Module catalog management.

use std::sync::Arc;

use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_database::repositories::ModuleRepository;
use authhub_entity::module::model::{CreateModule, UpdateModule};
use authhub_entity::module::Module;

/// Manages the canonical module catalog.
#[derive(Clone)]
pub struct ModuleService {
    modules: Arc<ModuleRepository>,
}

impl ModuleService {
    /// Wire the module flows to their repository.
    pub fn new(modules: Arc<ModuleRepository>) -> Self {
        Self { modules }
    }

    /// Creates a module; duplicate name is a conflict.
    pub async fn create(&self, data: &CreateModule) -> AppResult<Module> {
        self.modules.create(data).await
    }

    /// Lists all modules.
    pub async fn find_all(&self) -> AppResult<Vec<Module>> {
        self.modules.find_all().await
    }

    /// Fetches a module by id.
    pub async fn get(&self, id: Uuid) -> AppResult<Module> {
        self.modules
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Module {id} not found")))
    }

    /// Updates a module's fields.
    pub async fn update(&self, id: Uuid, data: &UpdateModule) -> AppResult<Module> {
        self.modules.update(id, data).await
    }

    /// Deletes a module; built-in modules are protected.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let module = self.get(id).await?;
        if module.is_system_module {
            return Err(AppError::forbidden("System modules cannot be deleted"));
        }
        if !self.modules.delete(id).await? {
            return Err(AppError::not_found(format!("Module {id} not found")));
        }
        Ok(())
    }
}

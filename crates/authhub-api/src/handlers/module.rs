//! Module catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use authhub_core::types::response::{Envelope, Meta};
use authhub_entity::module::model::{CreateModule, UpdateModule};

use crate::dto::request::CreateModuleRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::{entity_envelope, require, validated};
use crate::state::AppState;

/// POST /api/modules
pub async fn create_module(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateModuleRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "create")?;
    let req = validated(req)?;

    let data = CreateModule {
        name: req.name,
        description: req.description,
        is_system_module: req.is_system_module,
        routes: req.routes,
    };
    let module = state.module_service.create(&data).await?;
    entity_envelope("Module created successfully", 201, &module)
}

/// GET /api/modules
pub async fn list_modules(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let modules = state.module_service.find_all().await?;
    let total = modules.len() as i64;
    Ok(Json(
        Envelope::success("Modules retrieved successfully", 200)
            .with_data(serde_json::to_value(&modules).map_err(|e| ApiError(e.into()))?)
            .with_meta(Meta::total(total)),
    ))
}

/// GET /api/modules/{id}
pub async fn get_module(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let module = state.module_service.get(id).await?;
    entity_envelope("Module retrieved successfully", 200, &module)
}

/// PUT /api/modules/{id}
pub async fn update_module(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateModule>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let module = state.module_service.update(id, &data).await?;
    entity_envelope("Module updated successfully", 200, &module)
}

/// DELETE /api/modules/{id}
pub async fn delete_module(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "delete")?;
    state.module_service.delete(id).await?;
    Ok(Json(
        Envelope::success("Module deleted successfully", 200).with_meta(Meta::total(1)),
    ))
}


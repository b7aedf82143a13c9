//! Permission catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use authhub_core::types::response::{Envelope, Meta};
use authhub_entity::permission::model::{CreatePermission, UpdatePermission};

use crate::dto::request::CreatePermissionRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::{entity_envelope, require, validated};
use crate::state::AppState;

/// POST /api/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePermissionRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "create")?;
    let req = validated(req)?;

    let data = CreatePermission {
        name: req.name,
        description: req.description,
        action: req.action,
        resource: req.resource,
        resource_id: req.resource_id,
        kind: req.kind,
    };
    let permission = state.permission_service.create(&data).await?;
    entity_envelope("Permission created successfully", 201, &permission)
}

/// GET /api/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let permissions = state.permission_service.find_all().await?;
    let total = permissions.len() as i64;
    Ok(Json(
        Envelope::success("Permissions retrieved successfully", 200)
            .with_data(serde_json::to_value(&permissions).map_err(|e| ApiError(e.into()))?)
            .with_meta(Meta::total(total)),
    ))
}

/// GET /api/permissions/{id}
pub async fn get_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let permission = state.permission_service.get(id).await?;
    entity_envelope("Permission retrieved successfully", 200, &permission)
}

/// PUT /api/permissions/{id}
pub async fn update_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdatePermission>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let permission = state.permission_service.update(id, &data).await?;
    entity_envelope("Permission updated successfully", 200, &permission)
}

/// DELETE /api/permissions/{id}
pub async fn delete_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "delete")?;
    state.permission_service.delete(id).await?;
    Ok(Json(
        Envelope::success("Permission deleted successfully", 200).with_meta(Meta::total(1)),
    ))
}


//! Role catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use authhub_core::types::response::{Envelope, Meta};
use authhub_entity::role::model::UpdateRole;

use crate::dto::request::CreateRoleRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::{entity_envelope, require, validated};
use crate::state::AppState;

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRoleRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "create")?;
    let req = validated(req)?;
    let role = state.role_service.create(req.into()).await?;
    entity_envelope("Role created successfully", 201, &role)
}

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let roles = state.role_service.find_all().await?;
    let total = roles.len() as i64;
    Ok(Json(
        Envelope::success("Roles retrieved successfully", 200)
            .with_data(serde_json::to_value(&roles).map_err(|e| ApiError(e.into()))?)
            .with_meta(Meta::total(total)),
    ))
}

/// GET /api/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let role = state.role_service.get(id).await?;
    entity_envelope("Role retrieved successfully", 200, &role)
}

/// PUT /api/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateRole>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let role = state.role_service.update(id, &data).await?;
    entity_envelope("Role updated successfully", 200, &role)
}

/// DELETE /api/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "delete")?;
    state.role_service.delete(id).await?;
    Ok(Json(
        Envelope::success("Role deleted successfully", 200).with_meta(Meta::total(1)),
    ))
}


//! User management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use authhub_core::types::pagination::PageRequest;
use authhub_core::types::response::{Envelope, Meta};
use authhub_entity::user::model::UpdateUser;

use crate::dto::request::{AssignRequest, CreateUserRequest, ListUsersQuery};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::{entity_envelope, require, validated};
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "create")?;
    let req = validated(req)?;

    let user = state.user_service.create(req.into()).await?;

    Ok(Json(
        Envelope::success("User created successfully", 201)
            .with_data(serde_json::to_value(&user).map_err(|e| ApiError(e.into()))?)
            .with_meta(Meta {
                total_data: 1,
                id: Some(user.id),
                created_at: Some(user.created_at),
                ..Meta::default()
            }),
    ))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;

    let page = PageRequest {
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(100),
    };
    let result = state
        .user_service
        .find_by_page(&auth, query.search.as_deref(), &page)
        .await?;

    Ok(Json(
        Envelope::success("Users retrieved successfully", 200)
            .with_data(serde_json::to_value(&result.items).map_err(|e| ApiError(e.into()))?)
            .with_meta(Meta::total(result.total as i64)),
    ))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let user = state.user_service.get(id).await?;
    entity_envelope("User retrieved successfully", 200, &user)
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateUser>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let user = state.user_service.update(id, &data).await?;
    entity_envelope("User updated successfully", 200, &user)
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "delete")?;
    state.user_service.delete(id).await?;
    Ok(Json(
        Envelope::success("User deleted successfully", 200).with_meta(Meta::total(1)),
    ))
}

/// PUT /api/users/{id}/roles — re-grant role snapshots.
pub async fn assign_roles(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let user = state.user_service.assign_roles(id, &req.ids).await?;
    entity_envelope("Roles assigned successfully", 200, &user)
}

/// PUT /api/users/{id}/permissions — re-grant direct permissions.
pub async fn assign_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let user = state.user_service.assign_permissions(id, &req.ids).await?;
    entity_envelope("Permissions assigned successfully", 200, &user)
}

/// PUT /api/users/{id}/modules — re-grant module snapshots.
pub async fn assign_modules(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let user = state.user_service.assign_modules(id, &req.ids).await?;
    entity_envelope("Modules assigned successfully", 200, &user)
}


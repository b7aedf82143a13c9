//! Company catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use authhub_core::types::response::{Envelope, Meta};
use authhub_entity::company::model::{CreateCompany, UpdateCompany};

use crate::dto::request::CreateCompanyRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::{entity_envelope, require, validated};
use crate::state::AppState;

/// POST /api/companies
pub async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "create")?;
    let req = validated(req)?;

    let data = CreateCompany {
        name: req.name,
        legal_representative: req.legal_representative,
        tax_id: req.tax_id,
        address: req.address,
        phone: req.phone,
        email: req.email,
        web: req.web,
    };
    let company = state.company_service.create(&data).await?;
    entity_envelope("Company created successfully", 201, &company)
}

/// GET /api/companies
pub async fn list_companies(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let companies = state.company_service.find_all().await?;
    let total = companies.len() as i64;
    Ok(Json(
        Envelope::success("Companies retrieved successfully", 200)
            .with_data(serde_json::to_value(&companies).map_err(|e| ApiError(e.into()))?)
            .with_meta(Meta::total(total)),
    ))
}

/// GET /api/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "read")?;
    let company = state.company_service.get(id).await?;
    entity_envelope("Company retrieved successfully", 200, &company)
}

/// PUT /api/companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateCompany>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "update")?;
    let company = state.company_service.update(id, &data).await?;
    entity_envelope("Company updated successfully", 200, &company)
}

/// DELETE /api/companies/{id}
pub async fn delete_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    require(&auth, "delete")?;
    state.company_service.delete(id).await?;
    Ok(Json(
        Envelope::success("Company deleted successfully", 200).with_meta(Meta::total(1)),
    ))
}


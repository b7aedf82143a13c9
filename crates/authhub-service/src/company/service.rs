//! Company (tenant) catalog management.

use std::sync::Arc;

use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_database::repositories::CompanyRepository;
use authhub_entity::company::model::{CreateCompany, UpdateCompany};
use authhub_entity::company::Company;

/// Manages tenant companies.
#[derive(Clone)]
pub struct CompanyService {
    companies: Arc<CompanyRepository>,
}

impl CompanyService {
    /// Wire the company flows to their repository.
    pub fn new(companies: Arc<CompanyRepository>) -> Self {
        Self { companies }
    }

    /// Creates a company; duplicate name is a conflict.
    pub async fn create(&self, data: &CreateCompany) -> AppResult<Company> {
        self.companies.create(data).await
    }

    /// Lists all companies.
    pub async fn find_all(&self) -> AppResult<Vec<Company>> {
        self.companies.find_all().await
    }

    /// Fetches a company by id.
    pub async fn get(&self, id: Uuid) -> AppResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))
    }

    /// Updates a company's fields.
    pub async fn update(&self, id: Uuid, data: &UpdateCompany) -> AppResult<Company> {
        self.companies.update(id, data).await
    }

    /// Deletes a company.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.companies.delete(id).await? {
            return Err(AppError::not_found(format!("Company {id} not found")));
        }
        Ok(())
    }
}

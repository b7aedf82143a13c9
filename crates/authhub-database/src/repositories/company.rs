//! Company repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::company::model::{CreateCompany, UpdateCompany};
use authhub_entity::company::Company;

/// Repository for tenant companies.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    /// Create a new company repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a company by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find company by id", e)
            })
    }

    /// List all companies.
    pub async fn find_all(&self) -> AppResult<Vec<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list companies", e))
    }

    /// Create a new company.
    pub async fn create(&self, data: &CreateCompany) -> AppResult<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies \
               (name, legal_representative, tax_id, address, phone, email, web) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.legal_representative)
        .bind(&data.tax_id)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.web)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("companies_name_key") =>
            {
                AppError::conflict(format!("Company name '{}' already exists", data.name))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("companies_tax_id_key") =>
            {
                AppError::conflict("Company tax id already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create company", e),
        })
    }

    /// Update a company's fields.
    pub async fn update(&self, id: Uuid, data: &UpdateCompany) -> AppResult<Company> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = COALESCE($2, name), \
                                  legal_representative = COALESCE($3, legal_representative), \
                                  address = COALESCE($4, address), \
                                  phone = COALESCE($5, phone), \
                                  email = COALESCE($6, email), \
                                  web = COALESCE($7, web), \
                                  is_active = COALESCE($8, is_active), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.legal_representative)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.web)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("companies_name_key") =>
            {
                AppError::conflict("Company name already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update company", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))
    }

    /// Delete a company by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete company", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total companies.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count companies", e)
            })?;
        Ok(count as u64)
    }
}

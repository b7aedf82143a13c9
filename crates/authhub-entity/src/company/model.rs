//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tenant organization. Non-superadmin queries are scoped to the
/// caller's company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: Uuid,
    /// Unique company name.
    pub name: String,
    /// Legal representative.
    pub legal_representative: Option<String>,
    /// Tax identifier.
    pub tax_id: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Website URL.
    pub web: Option<String>,
    /// Inactive companies cannot be assigned to users.
    pub is_active: bool,
    /// When the company was created.
    pub created_at: DateTime<Utc>,
    /// When the company was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCompany {
    /// Unique company name.
    pub name: String,
    /// Legal representative.
    pub legal_representative: Option<String>,
    /// Tax identifier.
    pub tax_id: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Website URL.
    pub web: Option<String>,
}

/// Data for updating an existing company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCompany {
    /// New name.
    pub name: Option<String>,
    /// New legal representative.
    pub legal_representative: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New website URL.
    pub web: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

//! Session repository implementation.
//!
//! Sessions are a write-once audit trail; nothing in the business flows
//! reads them back.

use sqlx::PgPool;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::session::model::CreateSession;
use authhub_entity::session::Session;

/// Repository for login audit records.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a successful login.
    pub async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions \
               (user_id, user_name, email, company, expires_at, ip, os, os_version, \
                browser, browser_version, user_agent, is_mobile, is_tablet, is_browser) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.user_name)
        .bind(&data.email)
        .bind(&data.company)
        .bind(data.expires_at)
        .bind(&data.client.ip)
        .bind(&data.client.os)
        .bind(&data.client.os_version)
        .bind(&data.client.browser)
        .bind(&data.client.browser_version)
        .bind(&data.client.user_agent)
        .bind(data.client.is_mobile)
        .bind(data.client.is_tablet)
        .bind(data.client.is_browser)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record session", e))
    }

    /// Count total recorded sessions.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count sessions", e)
            })?;
        Ok(count as u64)
    }
}

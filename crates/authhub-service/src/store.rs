//! Persistence seams for the authentication flows.
//!
//! The auth flows only need a handful of operations, so they depend on
//! these narrow traits instead of the concrete repositories. The Pg
//! repositories implement them below; tests substitute in-memory doubles.

use async_trait::async_trait;
use uuid::Uuid;

use authhub_core::result::AppResult;
use authhub_database::repositories::{SessionRepository, UserRepository};
use authhub_entity::session::model::CreateSession;
use authhub_entity::session::Session;
use authhub_entity::user::User;

/// User lookups and credential writes needed by the auth flows.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Atomically replace the password hash and must-change flag.
    async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
        is_new_user: bool,
    ) -> AppResult<()>;
}

/// Write-side of the login audit trail.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record a successful login.
    async fn record(&self, data: &CreateSession) -> AppResult<Session>;
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
        is_new_user: bool,
    ) -> AppResult<()> {
        UserRepository::update_password(self, user_id, password_hash, is_new_user).await
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn record(&self, data: &CreateSession) -> AppResult<Session> {
        SessionRepository::create(self, data).await
    }
}

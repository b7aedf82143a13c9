//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it through the shared auth service, and injects the
//! user snapshot into the handler.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authhub_core::error::AppError;
use authhub_entity::user::UserProfile;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user snapshot available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserProfile);

impl std::ops::Deref for AuthUser {
    type Target = UserProfile;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing Authorization header")))?;

        // The scheme prefix is optional; the decoder strips it either way.
        let profile = state.auth_service.validate_token(header).await?;

        Ok(AuthUser(profile))
    }
}

//! HTTP handlers, one module per resource.

pub mod auth;
pub mod company;
pub mod health;
pub mod module;
pub mod permission;
pub mod role;
pub mod user;

use axum::Json;
use validator::Validate;

use authhub_auth::rbac::Authorizable;
use authhub_core::error::AppError;
use authhub_core::types::response::{Envelope, Meta};
use authhub_entity::user::UserProfile;

use crate::error::ApiError;

/// Gate a protected operation on the decision engine.
fn require(profile: &UserProfile, action: &str) -> Result<(), ApiError> {
    if profile.can_perform(action) {
        Ok(())
    } else {
        Err(ApiError(AppError::forbidden(format!(
            "Not allowed to perform '{action}'"
        ))))
    }
}

/// Run DTO validation, folding failures into the common error shape.
fn validated<T: Validate>(dto: T) -> Result<T, ApiError> {
    dto.validate()
        .map_err(|e| ApiError(AppError::validation(format!("Invalid request: {e}"))))?;
    Ok(dto)
}

/// Wrap a single entity in the common success envelope.
fn entity_envelope<T: serde::Serialize>(
    message: &str,
    status_code: u16,
    entity: &T,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(
        Envelope::success(message, status_code)
            .with_data(serde_json::to_value(entity).map_err(|e| ApiError(e.into()))?)
            .with_meta(Meta::total(1)),
    ))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use authhub_core::error::ErrorKind;
    use authhub_entity::user::{PermissionSnapshot, UserProfile};

    use super::require;

    fn profile_with_direct(action: &str) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            name: "T".into(),
            last_name: "U".into(),
            email: "t@u.v".into(),
            phone: None,
            company: "Acme".into(),
            is_active: true,
            is_admin: false,
            is_super_admin: false,
            is_new_user: false,
            roles: vec![],
            permissions: vec![PermissionSnapshot {
                id: Uuid::new_v4(),
                name: action.into(),
                description: String::new(),
                action: action.into(),
                is_active: true,
            }],
            modules: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn require_passes_granted_actions_and_blocks_the_rest() {
        let profile = profile_with_direct("read");
        assert!(require(&profile, "read").is_ok());
        assert!(require(&profile, "Read").is_ok());

        let err = require(&profile, "delete").unwrap_err();
        assert_eq!(err.0.kind, ErrorKind::Forbidden);
    }
}

//! Auth handlers — login, validate-user, change-password,
//! recovery-password.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use authhub_core::types::response::{Envelope, ValidationReply};
use authhub_entity::session::model::ClientMeta;
use authhub_entity::user::UserProfile;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RecoveryPasswordRequest};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validated;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let req = validated(req)?;
    let client = client_meta(&headers, req.meta);

    let result = state
        .auth_service
        .login(&req.email, &req.password, client)
        .await?;

    Ok(Json(result.envelope()?))
}

/// GET /api/auth/validate-user
pub async fn validate_user(auth: AuthUser) -> Json<ValidationReply<UserProfile>> {
    let id = auth.id;
    Json(ValidationReply::valid(auth.0, id))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let req = validated(req)?;
    let envelope = state
        .auth_service
        .change_password(req.id, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(envelope))
}

/// POST /api/auth/recovery-password
pub async fn recovery_password(
    State(state): State<AppState>,
    Json(req): Json<RecoveryPasswordRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let req = validated(req)?;
    let envelope = state.auth_service.recovery_password(&req.email).await?;
    Ok(Json(envelope))
}

/// Merge transport-level client hints into the caller-supplied fingerprint.
fn client_meta(headers: &HeaderMap, meta: Option<ClientMeta>) -> ClientMeta {
    let mut client = meta.unwrap_or_default();

    if client.user_agent.is_none() {
        client.user_agent = headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
    }
    if client.ip.is_none() {
        client.ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());
    }

    client
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn header_hints_fill_missing_fingerprint_fields() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("TestAgent/1.0"));
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );

        let client = client_meta(&headers, None);
        assert_eq!(client.user_agent.as_deref(), Some("TestAgent/1.0"));
        assert_eq!(client.ip.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn caller_supplied_fingerprint_wins_over_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("TestAgent/1.0"));

        let supplied = ClientMeta {
            user_agent: Some("NativeApp/2.0".into()),
            is_mobile: true,
            ..ClientMeta::default()
        };
        let client = client_meta(&headers, Some(supplied));
        assert_eq!(client.user_agent.as_deref(), Some("NativeApp/2.0"));
        assert!(client.is_mobile);
    }
}

//! Command dispatch: routes `{cmd, payload}` frames to the shared
//! services and folds the result into a reply value.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::types::pagination::PageRequest;
use authhub_core::types::response::{Envelope, Meta, ValidationReply};
use authhub_entity::session::model::ClientMeta;
use authhub_entity::user::model::UpdateUser;
use authhub_service::auth::AuthService;
use authhub_service::user::{NewUser, UserService};

use crate::envelope::{CommandRequest, error_reply, unknown_command_reply};

/// Services the command transport adapts. Shared with the HTTP layer.
#[derive(Clone)]
pub struct CommandContext {
    /// Authentication flows.
    pub auth: Arc<AuthService>,
    /// User management flows.
    pub users: Arc<UserService>,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
    #[serde(default)]
    meta: Option<ClientMeta>,
}

#[derive(Debug, Deserialize)]
struct IdPayload {
    id: Uuid,
}

#[derive(Debug, Deserialize)]
struct UpdateUserPayload {
    id: Uuid,
    #[serde(flatten)]
    data: UpdateUser,
}

#[derive(Debug, Default, Deserialize)]
struct PagePayload {
    #[serde(default)]
    page: Option<u64>,
    #[serde(default)]
    page_size: Option<u64>,
    #[serde(default)]
    search: Option<String>,
}

/// Handle one parsed request. Every failure becomes a structured error
/// reply; this function itself never fails.
pub async fn handle(ctx: &CommandContext, request: CommandRequest) -> Value {
    let result = match request.cmd.as_str() {
        "login" => login(ctx, request.payload).await,
        "validateUser" => validate_user(ctx, request.payload).await,
        "createUser" => create_user(ctx, request.payload).await,
        "findAllUsers" => find_all_users(ctx, request.payload).await,
        "findUserById" => find_user_by_id(ctx, request.payload).await,
        "updateUser" => update_user(ctx, request.payload).await,
        "removeUser" => remove_user(ctx, request.payload).await,
        other => return unknown_command_reply(other),
    };

    result.unwrap_or_else(|e| error_reply(&e))
}

fn parse<T: serde::de::DeserializeOwned>(payload: Value) -> AppResult<T> {
    serde_json::from_value(payload)
        .map_err(|e| AppError::validation(format!("Invalid command payload: {e}")))
}

async fn login(ctx: &CommandContext, payload: Value) -> AppResult<Value> {
    let payload: LoginPayload = parse(payload)?;
    let result = ctx
        .auth
        .login(
            &payload.email,
            &payload.password,
            payload.meta.unwrap_or_default(),
        )
        .await?;
    Ok(serde_json::to_value(result.envelope()?)?)
}

async fn validate_user(ctx: &CommandContext, payload: Value) -> AppResult<Value> {
    // The payload is the raw token, with or without its scheme prefix;
    // `{token}` objects are accepted too.
    let token = match payload {
        Value::String(token) => token,
        Value::Object(ref map) => map
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("Token is required"))?,
        _ => return Err(AppError::validation("Token is required")),
    };

    let profile = ctx.auth.validate_token(&token).await?;
    let id = profile.id;
    Ok(serde_json::to_value(ValidationReply::valid(profile, id))?)
}

async fn create_user(ctx: &CommandContext, payload: Value) -> AppResult<Value> {
    let input: NewUser = parse(payload)?;
    let user = ctx.users.create(input).await?;

    let envelope = Envelope::success("User created successfully", 201)
        .with_data(serde_json::to_value(&user)?)
        .with_meta(Meta {
            total_data: 1,
            id: Some(user.id),
            created_at: Some(user.created_at),
            ..Meta::default()
        });
    Ok(serde_json::to_value(envelope)?)
}

async fn find_all_users(ctx: &CommandContext, payload: Value) -> AppResult<Value> {
    let payload: PagePayload = if payload.is_null() {
        PagePayload::default()
    } else {
        parse(payload)?
    };
    let page = PageRequest {
        page: payload.page.unwrap_or(1),
        page_size: payload.page_size.unwrap_or(100),
    };

    let result = ctx
        .users
        .find_by_page_any(payload.search.as_deref(), &page)
        .await?;

    let envelope = Envelope::success("Users retrieved successfully", 200)
        .with_data(serde_json::to_value(&result.items)?)
        .with_meta(Meta::total(result.total as i64));
    Ok(serde_json::to_value(envelope)?)
}

async fn find_user_by_id(ctx: &CommandContext, payload: Value) -> AppResult<Value> {
    let payload: IdPayload = parse(payload)?;
    let user = ctx.users.get(payload.id).await?;

    let envelope = Envelope::success("User retrieved successfully", 200)
        .with_data(serde_json::to_value(&user)?)
        .with_meta(Meta::total(1));
    Ok(serde_json::to_value(envelope)?)
}

async fn update_user(ctx: &CommandContext, payload: Value) -> AppResult<Value> {
    let payload: UpdateUserPayload = parse(payload)?;
    let user = ctx.users.update(payload.id, &payload.data).await?;

    let envelope = Envelope::success("User updated successfully", 200)
        .with_data(serde_json::to_value(&user)?)
        .with_meta(Meta::total(1));
    Ok(serde_json::to_value(envelope)?)
}

async fn remove_user(ctx: &CommandContext, payload: Value) -> AppResult<Value> {
    let payload: IdPayload = parse(payload)?;
    ctx.users.delete(payload.id).await?;

    let envelope = Envelope::success("User deleted successfully", 200).with_meta(Meta::total(1));
    Ok(serde_json::to_value(envelope)?)
}

//! Route definitions for the AuthHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(role_routes())
        .merge(permission_routes())
        .merge(module_routes())
        .merge(company_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, validate-user, change-password,
/// recovery-password.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/validate-user", get(handlers::auth::validate_user))
        .route(
            "/auth/change-password",
            post(handlers::auth::change_password),
        )
        .route(
            "/auth/recovery-password",
            post(handlers::auth::recovery_password),
        )
}

/// User CRUD and snapshot re-grants.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::create_user))
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", put(handlers::user::update_user))
        .route("/users/{id}", delete(handlers::user::delete_user))
        .route("/users/{id}/roles", put(handlers::user::assign_roles))
        .route(
            "/users/{id}/permissions",
            put(handlers::user::assign_permissions),
        )
        .route("/users/{id}/modules", put(handlers::user::assign_modules))
}

/// Role catalog CRUD.
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", post(handlers::role::create_role))
        .route("/roles", get(handlers::role::list_roles))
        .route("/roles/{id}", get(handlers::role::get_role))
        .route("/roles/{id}", put(handlers::role::update_role))
        .route("/roles/{id}", delete(handlers::role::delete_role))
}

/// Permission catalog CRUD.
fn permission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/permissions",
            post(handlers::permission::create_permission),
        )
        .route("/permissions", get(handlers::permission::list_permissions))
        .route(
            "/permissions/{id}",
            get(handlers::permission::get_permission),
        )
        .route(
            "/permissions/{id}",
            put(handlers::permission::update_permission),
        )
        .route(
            "/permissions/{id}",
            delete(handlers::permission::delete_permission),
        )
}

/// Module catalog CRUD.
fn module_routes() -> Router<AppState> {
    Router::new()
        .route("/modules", post(handlers::module::create_module))
        .route("/modules", get(handlers::module::list_modules))
        .route("/modules/{id}", get(handlers::module::get_module))
        .route("/modules/{id}", put(handlers::module::update_module))
        .route("/modules/{id}", delete(handlers::module::delete_module))
}

/// Company catalog CRUD.
fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(handlers::company::create_company))
        .route("/companies", get(handlers::company::list_companies))
        .route("/companies/{id}", get(handlers::company::get_company))
        .route("/companies/{id}", put(handlers::company::update_company))
        .route("/companies/{id}", delete(handlers::company::delete_company))
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderName, HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}

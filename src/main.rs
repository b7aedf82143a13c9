//! AuthHub server — multi-tenant access-control backend.
//!
//! Main entry point that wires all crates together and starts both
//! transports: the HTTP API and the internal command listener.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authhub_core::config::AppConfig;
use authhub_core::error::AppError;
use authhub_service::mail::{Mailer, NoopMailer, SmtpMailer};
use authhub_service::store::{SessionStore, UserStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load and validate configuration. A missing signing secret aborts here.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("AUTHHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = authhub_database::connection::create_pool(&config.database).await?;
    authhub_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(authhub_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let role_repo = Arc::new(authhub_database::repositories::RoleRepository::new(
        db_pool.clone(),
    ));
    let permission_repo = Arc::new(authhub_database::repositories::PermissionRepository::new(
        db_pool.clone(),
    ));
    let module_repo = Arc::new(authhub_database::repositories::ModuleRepository::new(
        db_pool.clone(),
    ));
    let company_repo = Arc::new(authhub_database::repositories::CompanyRepository::new(
        db_pool.clone(),
    ));
    let session_repo = Arc::new(authhub_database::repositories::SessionRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: First-run seed ───────────────────────────────────
    let hasher = authhub_auth::password::PasswordHasher::new();
    let admin = authhub_database::seed::SeedAdmin {
        name: "Admin".to_string(),
        last_name: "User".to_string(),
        email: config.bootstrap.admin_email.clone(),
        password_hash: hasher.hash_password(&config.bootstrap.admin_password)?,
        company: config.bootstrap.company.clone(),
    };
    authhub_database::seed::run(&db_pool, &admin).await?;

    // ── Step 4: Mailer ───────────────────────────────────────────
    let mailer: Arc<dyn Mailer> = if config.mail.enabled {
        tracing::info!(host = %config.mail.host, "Outbound mail enabled");
        Arc::new(SmtpMailer::new(&config.mail)?)
    } else {
        tracing::info!("Outbound mail disabled");
        Arc::new(NoopMailer)
    };

    // ── Step 5: Services ─────────────────────────────────────────
    let auth_service = Arc::new(authhub_service::auth::AuthService::new(
        Arc::clone(&user_repo) as Arc<dyn UserStore>,
        Arc::clone(&session_repo) as Arc<dyn SessionStore>,
        Arc::clone(&mailer),
        &config.auth,
        &config.mail,
    ));
    let user_service = Arc::new(authhub_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
        Arc::clone(&permission_repo),
        Arc::clone(&module_repo),
        Arc::clone(&mailer),
        config.mail.login_url.clone(),
    ));
    let role_service = Arc::new(authhub_service::role::RoleService::new(
        Arc::clone(&role_repo),
        Arc::clone(&permission_repo),
    ));
    let permission_service = Arc::new(authhub_service::permission::PermissionService::new(
        Arc::clone(&permission_repo),
    ));
    let module_service = Arc::new(authhub_service::module::ModuleService::new(Arc::clone(
        &module_repo,
    )));
    let company_service = Arc::new(authhub_service::company::CompanyService::new(Arc::clone(
        &company_repo,
    )));

    // ── Step 6: Command transport ────────────────────────────────
    if config.command.enabled {
        let command_server = authhub_command::CommandServer::new(
            authhub_command::dispatch::CommandContext {
                auth: Arc::clone(&auth_service),
                users: Arc::clone(&user_service),
            },
            config.command.clone(),
        );
        tokio::spawn(async move {
            if let Err(e) = command_server.run().await {
                tracing::error!("Command transport error: {e}");
            }
        });
    } else {
        tracing::info!("Command transport disabled");
    }

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app_state = authhub_api::AppState {
        config: Arc::new(config.clone()),
        auth_service,
        user_service,
        role_service,
        permission_service,
        module_service,
        company_service,
    };

    let app = authhub_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuthHub listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("AuthHub shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

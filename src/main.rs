//! CRS Server — Course Request System
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use crs_core::config::AppConfig;
use crs_core::error::DomainError;
use crs_database::repositories::{CourseRepository, RequestRepository, UserRepository};
use crs_service::access::ViewerPolicy;
use crs_service::notify::{Mailer, NotificationService};
use crs_service::{CourseService, RequestService, UserService};

#[tokio::main]
async fn main() {
    let env = std::env::var("CRS_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
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
async fn run(config: AppConfig) -> Result<(), DomainError> {
    tracing::info!("Starting CRS v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = crs_database::DatabasePool::connect(&config.database).await?;
    db.health_check().await?;
    crs_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let course_repo = Arc::new(CourseRepository::new(db.pool().clone()));
    let request_repo = Arc::new(RequestRepository::new(db.pool().clone()));

    // ── Step 3: Policy + notifications ───────────────────────────
    let policy = ViewerPolicy::from_config(&config.policy)?;
    let mailer = Mailer::from_config(&config.notify)?;
    let notifications = Arc::new(NotificationService::new(
        user_repo.clone(),
        mailer,
        config.notify.base_url.clone(),
    ));

    // ── Step 4: Services ─────────────────────────────────────────
    let user_service = Arc::new(UserService::new(user_repo.clone(), policy));
    let course_service = Arc::new(CourseService::new(
        user_repo.clone(),
        course_repo.clone(),
        request_repo.clone(),
    ));
    let request_service = Arc::new(RequestService::new(
        user_repo.clone(),
        course_repo.clone(),
        request_repo.clone(),
        notifications,
    ));

    // ── Step 5: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = crs_api::AppState {
        config: Arc::new(config),
        user_service,
        course_service,
        request_service,
    };
    let app = crs_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DomainError::Configuration(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CRS server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DomainError::Configuration(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("CRS server shut down gracefully");
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

//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use crs_core::error::DomainError;

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::store("Failed to run migrations", e))?;

    info!("Database migrations completed successfully");
    Ok(())
}

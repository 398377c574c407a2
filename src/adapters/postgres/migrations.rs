//! Embedded schema migrations.

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Migration failed: {}", e)))?;
    tracing::info!("Migrations completed successfully");
    Ok(())
}

//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! fb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Storefront migrations live in `crates/storefront/migrations/` and are
//! embedded into the binary at compile time:
//! ```text
//! migrations/
//! ├── 20260301000001_create_users.sql
//! └── 20260301000002_create_products.sql
//! ```

use thiserror::Error;

use frostbites_storefront::db;

use super::{DATABASE_URL_VAR, database_url};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns an error if the connection string is missing, the database is
/// unreachable, or a migration fails.
pub async fn storefront() -> Result<(), MigrationError> {
    let database_url = database_url().ok_or(MigrationError::MissingEnvVar(DATABASE_URL_VAR))?;

    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url).await?;

    let migrator = sqlx::migrate!("../storefront/migrations");
    tracing::info!(
        available = migrator.iter().count(),
        "Running storefront migrations..."
    );
    migrator.run(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}

//! Account management commands.
//!
//! Accounts are created through `POST /auth/register`; the admin claim can
//! only be granted from here.
//!
//! # Usage
//!
//! ```bash
//! fb-cli user promote -e owner@frostbites.co
//! fb-cli user promote -e owner@frostbites.co --revoke
//! ```
//!
//! The new flag is picked up at the account's next login. Tokens that were
//! already issued keep their claim until they expire.

use thiserror::Error;

use frostbites_core::{Email, EmailError};
use frostbites_storefront::db::{self, RepositoryError, UserRepository};

use super::{DATABASE_URL_VAR, database_url};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("No account registered with email: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// Set (or clear) the admin flag on an existing account.
///
/// # Errors
///
/// Returns an error if the email is malformed, no account uses it, or the
/// database is unreachable.
pub async fn promote(email: &str, is_admin: bool) -> Result<(), UserError> {
    let email = Email::parse(email)?;
    let database_url = database_url().ok_or(UserError::MissingEnvVar(DATABASE_URL_VAR))?;

    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url).await?;

    UserRepository::new(&pool)
        .set_admin(&email, is_admin)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => UserError::NotFound(email.to_string()),
            other => UserError::Repository(other),
        })?;

    if is_admin {
        tracing::info!("Admin access granted to {}", email);
    } else {
        tracing::info!("Admin access revoked from {}", email);
    }
    tracing::warn!("Existing sessions keep their current claim until the token expires");

    Ok(())
}

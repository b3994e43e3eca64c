//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use frostbites_core::{Email, UserId};

/// A storefront account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name given at registration.
    pub name: String,
    /// Login email address.
    pub email: Email,
    /// Whether the account may manage the catalog.
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

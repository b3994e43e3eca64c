//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Account registration and password login
//! - `catalog` - Product CRUD behind a short-lived cache
//! - `token` - Session token signing and verification

pub mod auth;
pub mod catalog;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use catalog::ProductCatalog;
pub use token::{TokenError, TokenService};

//! Domain models for the storefront.

pub mod session;
pub mod user;

pub use session::{AuthenticatedUser, SessionClaims};
pub use user::User;

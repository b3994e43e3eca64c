//! Session token claims and the per-request identity derived from them.

use serde::{Deserialize, Serialize};

use frostbites_core::UserId;

/// Payload of a signed session token.
///
/// Never stored; decoded from the `token` header on each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "user")]
    pub user_id: UserId,
    #[serde(rename = "admin")]
    pub is_admin: bool,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Identity attached to a request after its token has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl From<SessionClaims> for AuthenticatedUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            is_admin: claims.is_admin,
        }
    }
}

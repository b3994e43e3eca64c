//! Session token issuance and verification (HS256 JWT).

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use frostbites_core::UserId;

use crate::models::SessionClaims;

/// Why a token was not accepted.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service from the signing secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for a user, valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the claims cannot be encoded.
    pub fn issue(&self, user_id: UserId, is_admin: bool) -> Result<String, TokenError> {
        self.issue_at(user_id, is_admin, Utc::now().timestamp())
    }

    fn issue_at(&self, user_id: UserId, is_admin: bool, now: i64) -> Result<String, TokenError> {
        let claims = SessionClaims {
            user_id,
            is_admin,
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired`, `TokenError::InvalidSignature`, or
    /// `TokenError::Malformed` when the token is not acceptable.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

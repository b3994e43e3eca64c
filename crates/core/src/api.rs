//! Request and response bodies of the storefront HTTP API.
//!
//! The server serializes these and the client deserializes them. JSON field
//! names follow what the browser client has always consumed (`isAdmin`,
//! `imageUrl`), hence the serde renames.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductDraft};

/// Header carrying the session token on protected requests.
pub const TOKEN_HEADER: &str = "token";

/// Message returned with every rejected token.
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// `GET /auth/verify` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    /// A failed response with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// `POST /auth/login` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

/// `GET /product` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `POST /product/create` and `PUT /product/{id}` request.
pub type ProductRequest = ProductDraft;

/// `POST /product/create` and `PUT /product/{id}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
    pub message: String,
}

/// Response carrying only an outcome message (e.g. `DELETE /product/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_response_uses_camel_case_flag() {
        let json = serde_json::to_string(&VerifyResponse {
            success: true,
            is_admin: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"success":true,"isAdmin":true}"#);
    }

    #[test]
    fn test_verify_response_admin_defaults_to_false() {
        let parsed: VerifyResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(!parsed.is_admin);
    }

    #[test]
    fn test_error_response_is_unsuccessful() {
        let body = ErrorResponse::new(NOT_AUTHORIZED);
        assert!(!body.success);
        assert_eq!(body.message, "Not authorized");
    }
}

//! Integration tests for Frost Bites.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations and start the API
//! cargo run -p frostbites-cli -- migrate
//! cargo run -p frostbites-storefront
//!
//! # Run integration tests
//! cargo test -p frostbites-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Where the API listens (default: `http://localhost:3000`)
//! - `STOREFRONT_DATABASE_URL` - Same database as the server; used to grant the
//!   admin flag to test accounts
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login and token verification
//! - `products` - Catalog listing and admin product CRUD
//! - `client_sync` - The client crate's state types against the live API

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use frostbites_core::Email;
use frostbites_core::api::{TOKEN_HEADER, TokenResponse};
use frostbites_storefront::db::{self, UserRepository};

/// Password used for every test account.
pub const TEST_PASSWORD: &str = "frozen-custard-42";

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A fresh email address for one test.
#[must_use]
pub fn unique_email() -> String {
    format!("test-{}@frostbites.test", Uuid::new_v4().simple())
}

/// A product name no other test will use (the catalog enforces unique names).
#[must_use]
pub fn unique_product_name(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix} {}", suffix.get(..8).unwrap_or(&suffix))
}

/// HTTP client plus the API base URL.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context whose requests share one fake client IP.
    ///
    /// The auth endpoints are rate limited per IP, so each context presents
    /// its own `x-forwarded-for` address to get a separate bucket.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let [a, b, c, ..] = Uuid::new_v4().into_bytes();
        let ip = format!("10.{a}.{b}.{c}");

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_str(&ip).expect("IPv4 literal is a valid header value"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: storefront_base_url(),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Register an account and return its token.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or registration is refused.
    pub async fn register(&self, email: &str) -> String {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({
                "name": "Test Shopper",
                "email": email,
                "password": TEST_PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to send register request");

        assert_eq!(resp.status(), StatusCode::CREATED, "registration failed");
        json_body::<TokenResponse>(resp).await.token
    }

    /// Log in and return the raw response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Register an account, grant it the admin flag, and return a token that
    /// carries the claim.
    ///
    /// # Panics
    ///
    /// Panics if any step fails.
    pub async fn admin_token(&self) -> String {
        let email = unique_email();
        self.register(&email).await;
        grant_admin(&email).await;

        let resp = self.login(&email, TEST_PASSWORD).await;
        assert_eq!(resp.status(), StatusCode::OK, "admin login failed");
        json_body::<TokenResponse>(resp).await.token
    }

    /// `GET /auth/verify` with an optional token.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn verify(&self, token: Option<&str>) -> Response {
        let mut request = self.client.get(self.url("/auth/verify"));
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token);
        }
        request.send().await.expect("Failed to send verify request")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Set the admin flag directly in the database.
///
/// # Panics
///
/// Panics if the database URL is missing or the update fails.
pub async fn grant_admin(email: &str) {
    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("STOREFRONT_DATABASE_URL must be set for admin tests");

    let pool = db::create_pool(&database_url)
        .await
        .expect("Failed to connect to storefront database");
    let email = Email::parse(email).expect("test email is valid");

    UserRepository::new(&pool)
        .set_admin(&email, true)
        .await
        .expect("Failed to grant admin flag");
}

/// Decode a JSON response body.
///
/// # Panics
///
/// Panics if the body is not the expected JSON.
pub async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    resp.json::<T>().await.expect("Response body is not the expected JSON")
}

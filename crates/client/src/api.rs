//! HTTP client for the storefront API.
//!
//! The state types in this crate never hold an [`ApiClient`] directly; they
//! take anything implementing [`AuthApi`] or [`CatalogApi`], so tests can
//! drive them with in-memory fakes.

use std::future::Future;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use frostbites_core::api::{
    ErrorResponse, LoginRequest, MessageResponse, ProductRequest, ProductResponse,
    ProductsResponse, RegisterRequest, TOKEN_HEADER, TokenResponse, VerifyResponse,
};
use frostbites_core::ProductId;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Account endpoints.
pub trait AuthApi {
    /// `GET /auth/verify` with the session token.
    fn verify(&self, token: &str) -> impl Future<Output = Result<VerifyResponse, ClientError>> + Send;

    /// `POST /auth/login`.
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<TokenResponse, ClientError>> + Send;

    /// `POST /auth/register`.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<TokenResponse, ClientError>> + Send;
}

/// Product catalog endpoints. Mutations need an admin token.
pub trait CatalogApi {
    /// `GET /product`.
    fn list_products(&self) -> impl Future<Output = Result<ProductsResponse, ClientError>> + Send;

    /// `POST /product/create`.
    fn create_product(
        &self,
        token: &str,
        draft: &ProductRequest,
    ) -> impl Future<Output = Result<ProductResponse, ClientError>> + Send;

    /// `PUT /product/{id}`.
    fn update_product(
        &self,
        token: &str,
        id: ProductId,
        draft: &ProductRequest,
    ) -> impl Future<Output = Result<ProductResponse, ClientError>> + Send;

    /// `DELETE /product/{id}`.
    fn delete_product(
        &self,
        token: &str,
        id: ProductId,
    ) -> impl Future<Output = Result<MessageResponse, ClientError>> + Send;
}

/// Storefront API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    config: ClientConfig,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                config: config.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        self.inner
            .config
            .endpoint(path)
            .map_err(|e| ClientError::Network(format!("invalid endpoint {path}: {e}")))
    }

    /// Send a request and decode the JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "API response");
        decode_response(status, &body)
    }
}

/// Turn a status and body into the endpoint's response type.
///
/// Non-success statuses become [`ClientError::Rejected`] carrying the
/// server's `message`, or the status reason when the body has none.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ClientError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(body).map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            },
            |e| e.message,
        );
        warn!(status = %status, message = %message, "API request rejected");
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

impl AuthApi for ApiClient {
    async fn verify(&self, token: &str) -> Result<VerifyResponse, ClientError> {
        let url = self.url("/auth/verify")?;
        self.send(self.inner.client.get(url).header(TOKEN_HEADER, token))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let url = self.url("/auth/login")?;
        self.send(self.inner.client.post(url).json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ClientError> {
        let url = self.url("/auth/register")?;
        self.send(self.inner.client.post(url).json(request)).await
    }
}

impl CatalogApi for ApiClient {
    async fn list_products(&self) -> Result<ProductsResponse, ClientError> {
        let url = self.url("/product")?;
        self.send(self.inner.client.get(url)).await
    }

    async fn create_product(
        &self,
        token: &str,
        draft: &ProductRequest,
    ) -> Result<ProductResponse, ClientError> {
        let url = self.url("/product/create")?;
        self.send(
            self.inner
                .client
                .post(url)
                .header(TOKEN_HEADER, token)
                .json(draft),
        )
        .await
    }

    async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        draft: &ProductRequest,
    ) -> Result<ProductResponse, ClientError> {
        let url = self.url(&format!("/product/{id}"))?;
        self.send(
            self.inner
                .client
                .put(url)
                .header(TOKEN_HEADER, token)
                .json(draft),
        )
        .await
    }

    async fn delete_product(
        &self,
        token: &str,
        id: ProductId,
    ) -> Result<MessageResponse, ClientError> {
        let url = self.url(&format!("/product/{id}"))?;
        self.send(self.inner.client.delete(url).header(TOKEN_HEADER, token))
            .await
    }
}

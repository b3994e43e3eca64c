//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (database)
//!
//! # Auth
//! POST   /auth/register        - Create account, returns token (rate limited)
//! POST   /auth/login           - Returns token (rate limited)
//! GET    /auth/verify          - Token check, returns admin flag (token)
//!
//! # Products
//! GET    /product              - Catalog listing
//! POST   /product/create       - Create product (token, admin)
//! PUT    /product/{id}         - Update product (token, admin)
//! DELETE /product/{id}         - Delete product (token, admin)
//! ```

pub mod auth;
pub mod health;
pub mod products;

use std::time::Duration;

use axum::{
    Router,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use frostbites_core::api::TOKEN_HEADER;

use crate::error::AppError;
use crate::middleware::{
    auth_rate_limiter, request_id_middleware, security_headers_middleware, token_auth_middleware,
};
use crate::services::TokenService;
use crate::state::AppState;

/// JSON body extractor whose rejections use the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Path parameter extractor whose rejections use the API error shape.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Create the auth routes router.
pub fn auth_routes(tokens: TokenService) -> Router<AppState> {
    let credentials = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter());

    Router::new()
        .route("/verify", get(auth::verify))
        .route_layer(from_fn_with_state(tokens, token_auth_middleware))
        .merge(credentials)
}

/// Create the product routes router.
pub fn product_routes(tokens: TokenService) -> Router<AppState> {
    Router::new()
        .route("/create", post(products::create))
        .route("/{id}", put(products::update).delete(products::delete))
        .route_layer(from_fn_with_state(tokens, token_auth_middleware))
}

/// Create all routes for the storefront.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/product", get(products::index))
        .nest("/product", product_routes(state.tokens().clone()))
        .nest("/auth", auth_routes(state.tokens().clone()))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// CORS for the browser client.
///
/// Restricted to the configured origin when there is one, otherwise any origin.
fn cors_layer(client_origin: Option<&str>) -> CorsLayer {
    let Some(origin) = client_origin else {
        return CorsLayer::permissive();
    };

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(TOKEN_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid client origin, cross-origin requests disabled");
            layer
        }
    }
}

/// The complete application: routes, middleware, and state.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config().client_origin.as_deref());

    routes(&state)
        .layer(cors)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

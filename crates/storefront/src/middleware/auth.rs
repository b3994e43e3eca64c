//! Token authentication middleware and extractors.
//!
//! [`token_auth_middleware`] guards protected routes: it reads the `token`
//! header, verifies it, and stores an [`AuthenticatedUser`] in the request
//! extensions. Handlers then pull the identity out with [`RequireUser`] or
//! [`RequireAdmin`].
//!
//! Every rejection is the same 403 `{ "success": false, "message": "Not authorized" }`,
//! whether the token is missing, expired, forged, or lacks the admin claim.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use frostbites_core::api::{ErrorResponse, NOT_AUTHORIZED, TOKEN_HEADER};

use crate::models::AuthenticatedUser;
use crate::services::TokenService;

/// Rejection for requests without a usable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAuthorized;

impl IntoResponse for NotAuthorized {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, Json(ErrorResponse::new(NOT_AUTHORIZED))).into_response()
    }
}

/// Verify the `token` header and attach the caller's identity.
///
/// # Errors
///
/// Returns [`NotAuthorized`] when the header is absent, not valid UTF-8,
/// or carries a token with a bad signature or past its expiry.
pub async fn token_auth_middleware(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, NotAuthorized> {
    let path = request.uri().path().to_owned();

    let Some(value) = request.headers().get(TOKEN_HEADER) else {
        warn!(path = %path, "Missing token header");
        return Err(NotAuthorized);
    };

    let token = value.to_str().map_err(|_| {
        warn!(path = %path, "Invalid token header encoding");
        NotAuthorized
    })?;

    let claims = tokens.verify(token).map_err(|e| {
        warn!(path = %path, error = %e, "Token verification failed");
        NotAuthorized
    })?;

    let user = AuthenticatedUser::from(claims);
    debug!(path = %path, user_id = %user.user_id, is_admin = user.is_admin, "Token accepted");
    tracing::Span::current().record("user_id", user.user_id.as_i32());

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extractor that requires a verified token.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, user {}!", user.user_id)
/// }
/// ```
pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = NotAuthorized;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .map(Self)
            .ok_or(NotAuthorized)
    }
}

/// Extractor that requires a verified token carrying the admin claim.
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = NotAuthorized;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            warn!(user_id = %user.user_id, path = %parts.uri.path(), "Admin route refused");
            return Err(NotAuthorized);
        }
        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http, routing::get};
    use frostbites_core::UserId;
    use secrecy::SecretString;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::services::token::tests::{TEST_SECRET, service};

    async fn whoami(RequireUser(user): RequireUser) -> String {
        user.user_id.to_string()
    }

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        format!("admin {}", user.user_id)
    }

    fn router() -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route("/admin", get(admin_only))
            .layer(axum::middleware::from_fn_with_state(
                service(),
                token_auth_middleware,
            ))
    }

    fn request(path: &str, token: Option<&str>) -> http::Request<Body> {
        let mut builder = http::Request::builder().uri(path);
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_forbidden() {
        let response = router().oneshot(request("/whoami", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, ErrorResponse::new("Not authorized"));
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let token = service().issue(UserId::new(9), false).unwrap();
        let response = router()
            .oneshot(request("/whoami", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "9");
    }

    #[tokio::test]
    async fn test_garbage_token_is_forbidden() {
        let response = router()
            .oneshot(request("/whoami", Some("abc.def.ghi")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_forbidden() {
        let other = TokenService::new(
            &SecretString::from(TEST_SECRET.chars().rev().collect::<String>()),
            Duration::from_secs(60),
        );
        let token = other.issue(UserId::new(1), true).unwrap();
        let response = router()
            .oneshot(request("/admin", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_non_admin_refused_on_admin_route() {
        let token = service().issue(UserId::new(2), false).unwrap();
        let response = router()
            .oneshot(request("/admin", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(body_string(response).await.contains("Not authorized"));
    }

    #[tokio::test]
    async fn test_admin_allowed_on_admin_route() {
        let token = service().issue(UserId::new(3), true).unwrap();
        let response = router()
            .oneshot(request("/admin", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "admin 3");
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_is_forbidden() {
        let app = Router::new().route("/whoami", get(whoami));
        let response = app.oneshot(request("/whoami", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

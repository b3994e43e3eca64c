//! Authentication route handlers.
//!
//! Registration and login hand back a session token; the client sends it in
//! the `token` header and checks it with `/auth/verify`.

use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, instrument};

use frostbites_core::api::{LoginRequest, RegisterRequest, TokenResponse, VerifyResponse};

use crate::error::{Result, set_sentry_user};
use crate::middleware::RequireUser;
use crate::routes::ApiJson;
use crate::services::AuthService;
use crate::state::AppState;

/// `POST /auth/register`: create an account and sign the new user in.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&body.name, &body.email, &body.password)
        .await?;

    let token = state.tokens().issue(user.id, user.is_admin)?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    info!(user_id = %user.id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            success: true,
            token,
        }),
    ))
}

/// `POST /auth/login`: exchange credentials for a session token.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let user = AuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await?;

    let token = state.tokens().issue(user.id, user.is_admin)?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    info!(user_id = %user.id, is_admin = user.is_admin, "User logged in");

    Ok(Json(TokenResponse {
        success: true,
        token,
    }))
}

/// `GET /auth/verify`: report whether the token is valid and carries the admin claim.
///
/// Only reached with a verified token; the middleware answers 403 otherwise.
pub async fn verify(RequireUser(user): RequireUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        success: true,
        is_admin: user.is_admin,
    })
}

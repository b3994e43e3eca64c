//! Authentication state kept in step with the server.
//!
//! The page shell owns one [`AuthSync`]. It calls [`AuthSync::sync`] once on
//! load and again whenever [`AuthSync::needs_sync`] reports that the flags were
//! changed locally (after login, logout, or an explicit setter call). The
//! flags are what route gating and the navbar read.

use tracing::{debug, info, instrument};

use frostbites_core::api::{LoginRequest, RegisterRequest};

use crate::api::AuthApi;
use crate::error::ClientError;
use crate::notice::Notices;
use crate::token::TokenStore;

/// The two booleans everything else gates on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthFlags {
    pub is_authenticated: bool,
    pub is_admin: bool,
}

impl AuthFlags {
    /// Signed-in shopper.
    #[must_use]
    pub const fn user() -> Self {
        Self {
            is_authenticated: true,
            is_admin: false,
        }
    }

    /// Signed-in administrator.
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            is_authenticated: true,
            is_admin: true,
        }
    }
}

/// Auth flags plus the stored session token.
#[derive(Debug)]
pub struct AuthSync<S> {
    store: S,
    flags: AuthFlags,
    stale: bool,
}

impl<S: TokenStore> AuthSync<S> {
    /// Start signed out, with a sync pending.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            flags: AuthFlags {
                is_authenticated: false,
                is_admin: false,
            },
            stale: true,
        }
    }

    #[must_use]
    pub const fn flags(&self) -> AuthFlags {
        self.flags
    }

    /// The stored session token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    /// Whether the flags changed since the last sync.
    #[must_use]
    pub const fn needs_sync(&self) -> bool {
        self.stale
    }

    pub fn set_authenticated(&mut self, value: bool) {
        if self.flags.is_authenticated != value {
            self.flags.is_authenticated = value;
            self.stale = true;
        }
    }

    pub fn set_admin(&mut self, value: bool) {
        if self.flags.is_admin != value {
            self.flags.is_admin = value;
            self.stale = true;
        }
    }

    /// Re-check the stored token against `/auth/verify`.
    ///
    /// Without a token both flags drop to false and no request is made. A
    /// failed check queues an error notice and leaves the flags untouched.
    #[instrument(skip_all)]
    pub async fn sync<A: AuthApi>(&mut self, api: &A, notices: &mut Notices) {
        self.stale = false;

        let Some(token) = self.store.get() else {
            debug!("No stored token, signed out");
            self.flags = AuthFlags::default();
            return;
        };

        match api.verify(&token).await {
            Ok(verified) => {
                self.flags = AuthFlags {
                    is_authenticated: verified.success,
                    is_admin: verified.is_admin,
                };
                debug!(is_admin = verified.is_admin, "Session verified");
            }
            Err(e) => notices.error(e.to_string()),
        }
    }

    /// Sign in and store the returned token.
    ///
    /// # Errors
    ///
    /// Returns the API error after queuing it as a notice.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login<A: AuthApi>(
        &mut self,
        api: &A,
        request: &LoginRequest,
        notices: &mut Notices,
    ) -> Result<(), ClientError> {
        match api.login(request).await {
            Ok(response) => {
                self.accept_token(response.token);
                info!("Signed in");
                Ok(())
            }
            Err(e) => {
                notices.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Create an account and store the returned token.
    ///
    /// # Errors
    ///
    /// Returns the API error after queuing it as a notice.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn register<A: AuthApi>(
        &mut self,
        api: &A,
        request: &RegisterRequest,
        notices: &mut Notices,
    ) -> Result<(), ClientError> {
        match api.register(request).await {
            Ok(response) => {
                self.accept_token(response.token);
                notices.success("Account created");
                info!("Registered");
                Ok(())
            }
            Err(e) => {
                notices.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Forget the token and drop both flags.
    pub fn logout(&mut self) {
        self.store.clear();
        self.set_authenticated(false);
        self.set_admin(false);
        info!("Signed out");
    }

    fn accept_token(&mut self, token: String) {
        self.store.set(token);
        // The admin flag arrives with the next sync
        self.set_authenticated(true);
        self.stale = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use frostbites_core::api::{TokenResponse, VerifyResponse};

    use super::*;
    use crate::notice::NoticeLevel;
    use crate::token::MemoryTokenStore;

    /// In-memory stand-in for the auth endpoints.
    struct FakeAuthApi {
        verify: Result<VerifyResponse, ClientError>,
        issued_token: String,
        calls: AtomicUsize,
    }

    impl FakeAuthApi {
        fn answering(is_admin: bool) -> Self {
            Self {
                verify: Ok(VerifyResponse {
                    success: true,
                    is_admin,
                }),
                issued_token: "issued-token".to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                verify: Err(ClientError::Rejected {
                    status: 403,
                    message: message.to_string(),
                }),
                ..Self::answering(false)
            }
        }
    }

    impl AuthApi for FakeAuthApi {
        async fn verify(&self, _token: &str) -> Result<VerifyResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verify.clone()
        }

        async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
            if request.password == "wrong-password" {
                return Err(ClientError::Rejected {
                    status: 401,
                    message: "Invalid email or password".to_string(),
                });
            }
            Ok(TokenResponse {
                success: true,
                token: self.issued_token.clone(),
            })
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<TokenResponse, ClientError> {
            Ok(TokenResponse {
                success: true,
                token: self.issued_token.clone(),
            })
        }
    }

    fn login_request(password: &str) -> LoginRequest {
        LoginRequest {
            email: "shopper@frostbites.co".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sync_without_token_makes_no_request() {
        let api = FakeAuthApi::answering(true);
        let mut notices = Notices::default();
        let mut auth = AuthSync::new(MemoryTokenStore::default());
        auth.set_authenticated(true);

        auth.sync(&api, &mut notices).await;

        assert_eq!(auth.flags(), AuthFlags::default());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(!auth.needs_sync());
    }

    #[tokio::test]
    async fn test_sync_takes_flags_from_response() {
        let api = FakeAuthApi::answering(true);
        let mut notices = Notices::default();
        let mut auth = AuthSync::new(MemoryTokenStore::with_token("t"));

        auth.sync(&api, &mut notices).await;

        assert_eq!(auth.flags(), AuthFlags::admin());
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn test_sync_failure_keeps_flags_and_queues_notice() {
        let api = FakeAuthApi::rejecting("Not authorized");
        let mut notices = Notices::default();
        let mut auth = AuthSync::new(MemoryTokenStore::with_token("expired"));
        auth.set_authenticated(true);
        auth.set_admin(true);

        auth.sync(&api, &mut notices).await;

        assert_eq!(auth.flags(), AuthFlags::admin());
        let notice = notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Not authorized");
    }

    #[tokio::test]
    async fn test_login_stores_token_and_requests_sync() {
        let api = FakeAuthApi::answering(false);
        let mut notices = Notices::default();
        let mut auth = AuthSync::new(MemoryTokenStore::default());
        auth.sync(&api, &mut notices).await;

        auth.login(&api, &login_request("correct-horse"), &mut notices)
            .await
            .unwrap();

        assert_eq!(auth.token().as_deref(), Some("issued-token"));
        assert!(auth.flags().is_authenticated);
        assert!(auth.needs_sync());

        auth.sync(&api, &mut notices).await;
        assert_eq!(auth.flags(), AuthFlags::user());
    }

    #[tokio::test]
    async fn test_failed_login_queues_notice() {
        let api = FakeAuthApi::answering(false);
        let mut notices = Notices::default();
        let mut auth = AuthSync::new(MemoryTokenStore::default());

        let err = auth
            .login(&api, &login_request("wrong-password"), &mut notices)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(auth.token(), None);
        assert_eq!(
            notices.last().unwrap().message,
            "Invalid email or password"
        );
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let api = FakeAuthApi::answering(true);
        let mut notices = Notices::default();
        let mut auth = AuthSync::new(MemoryTokenStore::with_token("t"));
        auth.sync(&api, &mut notices).await;
        assert!(!auth.needs_sync());

        auth.logout();

        assert_eq!(auth.flags(), AuthFlags::default());
        assert_eq!(auth.token(), None);
        assert!(auth.needs_sync());
    }
}

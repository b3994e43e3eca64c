//! Client route table and auth gating.
//!
//! Everything here is a pure function of the path and the current
//! [`AuthFlags`], so the page shell can re-run it on every navigation and on
//! every auth state change.
//!
//! ```text
//! /                        Home
//! /about /contact /shop    Public pages
//! /login                   Signed out only, else -> /
//! /register                Signed out only, else -> /login
//! /profile                 Signed in only, else -> /not-found
//! /admin                   Admin only, else -> /not-found
//! /forgot-password
//! /reset-password/:token
//! /verify-email            Signed out only, else -> /
//! /send-email/:token       Signed out only, else -> /
//! /resend-email
//! /not-found               Fallback for everything else
//! ```

use crate::session::AuthFlags;

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const NOT_FOUND: &str = "/not-found";

/// Upper bound on redirect hops; the table never chains more than two.
const MAX_REDIRECTS: usize = 4;

/// A page the client can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Contact,
    Shop,
    Login,
    Register,
    Profile,
    Admin,
    ForgotPassword,
    ResetPassword { token: String },
    VerifyEmail,
    SendEmail { token: String },
    ResendEmail,
    NotFound,
}

/// Outcome of matching a path against the gated route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(&'static str),
}

impl Route {
    /// Match a path, ignoring any query string, fragment or trailing slash.
    ///
    /// Returns `None` for paths with no route.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = normalize(path);

        let route = match path {
            "/" => Self::Home,
            "/about" => Self::About,
            "/contact" => Self::Contact,
            "/shop" => Self::Shop,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/profile" => Self::Profile,
            "/admin" => Self::Admin,
            "/forgot-password" => Self::ForgotPassword,
            "/verify-email" => Self::VerifyEmail,
            "/resend-email" => Self::ResendEmail,
            "/not-found" => Self::NotFound,
            _ => {
                if let Some(token) = param(path, "/reset-password/") {
                    Self::ResetPassword { token }
                } else if let Some(token) = param(path, "/send-email/") {
                    Self::SendEmail { token }
                } else {
                    return None;
                }
            }
        };
        Some(route)
    }

    /// Canonical path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => HOME.to_string(),
            Self::About => "/about".to_string(),
            Self::Contact => "/contact".to_string(),
            Self::Shop => "/shop".to_string(),
            Self::Login => LOGIN.to_string(),
            Self::Register => "/register".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword { token } => format!("/reset-password/{token}"),
            Self::VerifyEmail => "/verify-email".to_string(),
            Self::SendEmail { token } => format!("/send-email/{token}"),
            Self::ResendEmail => "/resend-email".to_string(),
            Self::NotFound => NOT_FOUND.to_string(),
        }
    }
}

/// Apply the auth gates to a path.
#[must_use]
pub fn resolve(path: &str, flags: AuthFlags) -> Resolution {
    let Some(route) = Route::parse(path) else {
        return Resolution::Redirect(NOT_FOUND);
    };

    let AuthFlags {
        is_authenticated,
        is_admin,
    } = flags;

    match route {
        Route::Admin if !(is_authenticated && is_admin) => Resolution::Redirect(NOT_FOUND),
        Route::Profile if !is_authenticated => Resolution::Redirect(NOT_FOUND),
        Route::Login | Route::VerifyEmail | Route::SendEmail { .. } if is_authenticated => {
            Resolution::Redirect(HOME)
        }
        Route::Register if is_authenticated => Resolution::Redirect(LOGIN),
        route => Resolution::Render(route),
    }
}

/// Follow redirects until a route renders.
#[must_use]
pub fn navigate(path: &str, flags: AuthFlags) -> Route {
    let mut current = resolve(path, flags);
    for _ in 0..MAX_REDIRECTS {
        match current {
            Resolution::Render(route) => return route,
            Resolution::Redirect(target) => current = resolve(target, flags),
        }
    }
    tracing::warn!(path, "Redirect loop, showing not-found page");
    Route::NotFound
}

/// Which pieces of page chrome surround a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub navbar: bool,
    pub footer: bool,
    pub cart: bool,
    pub location: bool,
}

impl Chrome {
    /// Paths rendered without navbar and footer.
    const BARE_PATHS: [&'static str; 6] = [
        "/login",
        "/register",
        "/not-found",
        "/verify-email",
        "/resend-email",
        "/forgot-password",
    ];
    const BARE_PREFIXES: [&'static str; 2] = ["/send-email/", "/reset-password/"];

    /// Chrome for the path as shown in the address bar.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        let path = strip_query(path);

        let shown = !Self::BARE_PATHS.contains(&path)
            && !Self::BARE_PREFIXES.iter().any(|p| path.starts_with(p));
        let cart = shown && path != "/shop";
        let location = cart && path != "/profile" && path != "/admin";

        Self {
            navbar: shown,
            footer: shown,
            cart,
            location,
        }
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn normalize(path: &str) -> &str {
    let path = strip_query(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// The single non-empty segment after `prefix`.
fn param(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    (!rest.is_empty() && !rest.contains('/')).then(|| rest.to_string())
}

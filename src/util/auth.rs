//! Navigation guard for auth-gated routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosting router asks [`guard`] before every navigation and applies the
//! returned decision. The check is token presence only: a stale token still
//! passes until a failed profile fetch in `SessionContext::check_auth` clears
//! it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::token_store::TokenStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

/// Access requirements attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Only reachable with a token; otherwise redirect to login.
    pub requires_auth: bool,
    /// Only reachable without a token (login/register); otherwise redirect home.
    pub requires_guest: bool,
}

impl RouteMeta {
    #[must_use]
    pub const fn auth() -> Self {
        Self { requires_auth: true, requires_guest: false }
    }

    #[must_use]
    pub const fn guest() -> Self {
        Self { requires_auth: false, requires_guest: true }
    }
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(&'static str),
}

/// Decide whether navigation to a route with `meta` may proceed.
#[must_use]
pub fn guard(meta: RouteMeta, token_present: bool) -> Navigation {
    if meta.requires_auth && !token_present {
        Navigation::Redirect(LOGIN_ROUTE)
    } else if meta.requires_guest && token_present {
        Navigation::Redirect(HOME_ROUTE)
    } else {
        Navigation::Allow
    }
}

/// [`guard`] with token presence read from `tokens`.
pub fn guard_with_store<S: TokenStore + ?Sized>(meta: RouteMeta, tokens: &S) -> Navigation {
    let decision = guard(meta, tokens.has_token());
    if let Navigation::Redirect(to) = decision {
        tracing::debug!(%to, "navigation redirected");
    }
    decision
}

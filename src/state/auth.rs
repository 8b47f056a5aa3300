//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`SessionContext`] is the explicit replacement for a global session store:
//! whatever owns UI state holds one and calls `login`, `register`,
//! `check_auth`, and `logout` on it. Observers (views, guards) read the
//! [`SharedSession`] handle.
//!
//! ERROR HANDLING
//! ==============
//! This is the only layer that catches API errors. `login`/`register` turn
//! them into `Err(message)` and record the message in `error`; `check_auth`
//! treats any failure as an expired session and logs out. Actions are not
//! serialized against each other: concurrent calls interleave their writes
//! and the last writer wins.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, PoisonError, RwLock};

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::Transport;
use crate::net::types::{LoginRequest, RegisterRequest, User};
use crate::util::token_store::TokenStore;

/// Snapshot of the session as seen by the UI.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Cloneable handle to the live [`SessionState`].
#[derive(Clone, Debug, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<SessionState>>,
}

impl SharedSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn update(&self, mutate: impl FnOnce(&mut SessionState)) {
        mutate(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner));
    }
}

/// Session actions bound to an [`ApiClient`].
pub struct SessionContext<T, S> {
    api: ApiClient<T, S>,
    state: SharedSession,
}

impl<T: Transport, S: TokenStore> SessionContext<T, S> {
    #[must_use]
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self::with_shared_state(api, SharedSession::new())
    }

    /// Bind to an existing state handle, e.g. one already provided to views.
    #[must_use]
    pub fn with_shared_state(api: ApiClient<T, S>, state: SharedSession) -> Self {
        Self { api, state }
    }

    /// The facade, for calls that do not touch session state.
    #[must_use]
    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    #[must_use]
    pub fn shared_state(&self) -> SharedSession {
        self.state.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.snapshot().user
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.snapshot().is_authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.snapshot().is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.snapshot().error
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Log in, persist the token, then load the profile.
    ///
    /// If the profile fetch fails after the token was stored, the token stays
    /// stored; the next `check_auth` decides whether it is still good.
    ///
    /// # Errors
    ///
    /// Returns the failure message, which is also recorded in `error`.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), String> {
        self.begin_tracked();
        let outcome = self.login_inner(credentials).await;
        self.settle_tracked(outcome)
    }

    async fn login_inner(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        let token = self.api.login(credentials).await?;
        self.api.put_access_token(&token)?;
        let user = self.api.get_profile().await?;
        tracing::info!(user = ?user.user_name, "session established");
        self.set_user(user);
        Ok(())
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns the failure message, which is also recorded in `error`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, String> {
        self.begin_tracked();
        let outcome = self.api.register(request).await;
        self.settle_tracked(outcome)
    }

    /// Validate the stored token by fetching the profile.
    ///
    /// Returns `false` without any network call when no token is stored. Any
    /// profile failure is treated as an expired session and logs out.
    pub async fn check_auth(&self) -> bool {
        if !self.api.tokens().has_token() {
            return false;
        }

        self.state.update(|s| s.is_loading = true);
        let authenticated = match self.api.get_profile().await {
            Ok(user) => {
                self.set_user(user);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session rejected");
                self.logout();
                false
            }
        };
        self.state.update(|s| s.is_loading = false);
        authenticated
    }

    /// Drop the user and the stored token. No network call.
    pub fn logout(&self) {
        self.state.update(|s| {
            s.user = None;
            s.is_authenticated = false;
        });
        if let Err(e) = self.api.remove_access_token() {
            tracing::warn!(error = %e, "failed to remove stored token");
        }
        tracing::info!("session cleared");
    }

    // =========================================================================
    // STATE HELPERS
    // =========================================================================

    fn set_user(&self, user: User) {
        self.state.update(|s| {
            s.user = Some(user);
            s.is_authenticated = true;
        });
    }

    fn begin_tracked(&self) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }

    fn settle_tracked<R>(&self, outcome: Result<R, ApiError>) -> Result<R, String> {
        let outcome = outcome.map_err(|e| e.to_string());
        self.state.update(|s| {
            if let Err(message) = &outcome {
                s.error = Some(message.clone());
            }
            s.is_loading = false;
        });
        outcome
    }
}

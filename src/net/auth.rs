//! Account endpoints: register, login, profile.
//!
//! Register and login go out without credentials; profile uses the bearer
//! token from the store.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::api::{ApiClient, get, json_request};
use super::error::ApiError;
use super::transport::{Method, Transport};
use super::types::{LoginRequest, RegisterRequest, TokenData, User, UserData};
use crate::util::token_store::TokenStore;

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// Create an account via `POST /auth/register`. Returns `data.user`.
    ///
    /// Registration does not log the user in; no token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] with the server message when registration
    /// is rejected, or any transport/decode failure.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let url = self.endpoint(&["auth", "register"], &[])?;
        let data: UserData = self.call_public(json_request(Method::Post, url, request)?).await?;
        Ok(data.user)
    }

    /// Exchange credentials via `POST /auth/login`. Returns `data.access_token` only.
    ///
    /// The token is returned, not stored; persisting it is the caller's call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] with the server message on bad
    /// credentials, or any transport/decode failure.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let url = self.endpoint(&["auth", "login"], &[])?;
        let data: TokenData = self.call_public(json_request(Method::Post, url, request)?).await?;
        Ok(data.access_token)
    }

    /// Fetch the signed-in account via `GET /auth/profile`. Returns `data.user`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] when the token is missing or rejected, or
    /// any storage/transport/decode failure.
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let url = self.endpoint(&["auth", "profile"], &[])?;
        let data: UserData = self.call(get(url)).await?;
        Ok(data.user)
    }
}

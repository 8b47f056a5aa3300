//! REST facade for the booking service.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`ApiClient`] is the single entry point the rest of the application uses.
//! Resource operations live in `auth`, `bookings`, and `rooms` as further
//! `impl` blocks on this type; this module holds the shared plumbing: URL
//! building, the bearer-token request helper, and envelope unwrapping.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here catches. Transport, storage, decode, and `success: false`
//! failures all propagate to the caller as [`ApiError`]. HTTP status codes are
//! not inspected; only the envelope decides success.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::Envelope;
use crate::config::ApiConfig;
use crate::util::token_store::{StorageError, TokenStore};

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const APPLICATION_JSON: &str = "application/json";
pub(crate) const AUTHORIZATION: &str = "Authorization";

/// Typed client over a [`Transport`] with tokens kept in a [`TokenStore`].
pub struct ApiClient<T, S> {
    config: ApiConfig,
    transport: T,
    tokens: S,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    #[must_use]
    pub fn new(config: ApiConfig, transport: T, tokens: S) -> Self {
        Self { config, transport, tokens }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    // =========================================================================
    // TOKEN ACCESSORS
    // =========================================================================

    /// Persist the access token used by authenticated calls.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`].
    pub fn put_access_token(&self, token: &str) -> Result<(), StorageError> {
        self.tokens.put_token(token)
    }

    /// Read the stored access token.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`].
    pub fn get_access_token(&self) -> Result<Option<String>, StorageError> {
        self.tokens.get_token()
    }

    /// Forget the stored access token.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`].
    pub fn remove_access_token(&self) -> Result<(), StorageError> {
        self.tokens.remove_token()
    }

    // =========================================================================
    // REQUEST HELPERS
    // =========================================================================

    /// Send `request` as-is, without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if no response arrives.
    pub async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, auth = false, "api request");
        Ok(self.transport.send(request).await?)
    }

    /// Send `request` with `Authorization: Bearer <token>` appended.
    ///
    /// The token is read from the store on every call. When none is stored
    /// the header is still sent with an empty bearer value; rejecting it is
    /// the server's job.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the token cannot be read, or
    /// [`ApiError::Transport`] if no response arrives.
    pub async fn fetch_with_auth(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let token = self.tokens.get_token()?.unwrap_or_default();
        let request = request.header(AUTHORIZATION, bearer_value(&token));
        tracing::debug!(method = request.method.as_str(), url = %request.url, auth = true, "api request");
        Ok(self.transport.send(request).await?)
    }

    /// Build an absolute URL from path segments and query pairs.
    ///
    /// Segments and query values are percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<String, ApiError> {
        build_url(self.config.base_url(), segments, query)
    }

    /// Authenticated exchange returning the decoded `data` payload.
    pub(crate) async fn call<D: DeserializeOwned>(&self, request: HttpRequest) -> Result<D, ApiError> {
        let url = request.url.clone();
        let response = self.fetch_with_auth(request).await?;
        decode_data(unwrap_logged(&url, &response)?)
    }

    /// Unauthenticated exchange returning the decoded `data` payload.
    pub(crate) async fn call_public<D: DeserializeOwned>(&self, request: HttpRequest) -> Result<D, ApiError> {
        let url = request.url.clone();
        let response = self.fetch(request).await?;
        decode_data(unwrap_logged(&url, &response)?)
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

fn build_url(base: &str, segments: &[&str], query: &[(&str, String)]) -> Result<String, ApiError> {
    let mut url = url::Url::parse(base).map_err(|e| ApiError::Url(format!("{base}: {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| ApiError::Url(format!("{base}: cannot be a base")))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
    }
    Ok(url.into())
}

/// GET request with no body.
pub(crate) fn get(url: String) -> HttpRequest {
    HttpRequest::new(Method::Get, url)
}

/// Request carrying `body` serialized as JSON.
pub(crate) fn json_request<B: Serialize + ?Sized>(method: Method, url: String, body: &B) -> Result<HttpRequest, ApiError> {
    let raw = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
    Ok(HttpRequest::new(method, url)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(raw))
}

/// Apply the envelope contract: `data` on success, the server message otherwise.
pub(crate) fn unwrap_envelope(response: &HttpResponse) -> Result<Value, ApiError> {
    let envelope: Envelope = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Decode(format!("status {}: {e}", response.status)))?;
    if !envelope.success {
        return Err(ApiError::Server { message: envelope.message });
    }
    Ok(envelope.data)
}

fn unwrap_logged(url: &str, response: &HttpResponse) -> Result<Value, ApiError> {
    unwrap_envelope(response).inspect_err(|e| {
        tracing::warn!(%url, status = response.status, error = %e, "api call failed");
    })
}

pub(crate) fn decode_data<D: DeserializeOwned>(data: Value) -> Result<D, ApiError> {
    serde_json::from_value(data).map_err(|e| ApiError::Decode(format!("data: {e}")))
}

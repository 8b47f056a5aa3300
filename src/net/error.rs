//! Error types for the transport and resource-client layers.

use crate::util::token_store::StorageError;

/// The request never produced a readable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

/// Errors returned by every resource-client operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, connection reset, body unreadable.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The access token could not be read from storage.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The request URL could not be built from the base and path.
    #[error("invalid request url: {0}")]
    Url(String),

    /// A request body could not be serialized to JSON.
    #[error("unencodable request body: {0}")]
    Encode(String),

    /// The response body is not an envelope, or `data` has the wrong shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The envelope reported `success: false`. Display is the server message.
    #[error("{message}")]
    Server { message: String },
}

impl ApiError {
    /// The server-provided message for envelope failures, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message } => Some(message),
            _ => None,
        }
    }
}

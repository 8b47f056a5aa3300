//! Persistence for the single bearer access token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is an opaque string stored under one fixed key. It is read fresh
//! on every authenticated request and never cached in memory by the API
//! client. Browser builds keep it in `localStorage`; native builds keep it in
//! a file; tests and embedders can use the in-memory store.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Errors raised by a [`TokenStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the token file failed.
    #[error("token file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `localStorage` is unavailable or rejected the operation.
    #[error("browser storage failed: {0}")]
    Browser(String),
}

/// Get/put/remove for one access-token string.
pub trait TokenStore: Send + Sync {
    /// Return the stored token, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_token(&self) -> Result<Option<String>, StorageError>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn put_token(&self, token: &str) -> Result<(), StorageError>;

    /// Delete the stored token. Removing an absent token succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_token(&self) -> Result<(), StorageError>;

    /// Whether a non-empty token is present. Unreadable storage counts as absent.
    fn has_token(&self) -> bool {
        matches!(self.get_token(), Ok(Some(token)) if !token.is_empty())
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { slot: Arc::new(RwLock::new(Some(token.to_owned()))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn put_token(&self, token: &str) -> Result<(), StorageError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn remove_token(&self) -> Result<(), StorageError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Durable native store: the token is the whole content of one file.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw.trim_end_matches(['\r', '\n']).to_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn put_token(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        write_private(&self.path, token).map_err(|e| self.io_error(e))
    }

    fn remove_token(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage` store keyed by [`ACCESS_TOKEN_KEY`].
#[cfg(all(feature = "hydrate", target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokenStore;

#[cfg(all(feature = "hydrate", target_arch = "wasm32"))]
impl LocalStorageTokenStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Browser("no window".to_owned()))?
            .local_storage()
            .map_err(|e| StorageError::Browser(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Browser("localStorage disabled".to_owned()))
    }
}

#[cfg(all(feature = "hydrate", target_arch = "wasm32"))]
impl TokenStore for LocalStorageTokenStore {
    fn get_token(&self) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(ACCESS_TOKEN_KEY)
            .map_err(|e| StorageError::Browser(format!("{e:?}")))
    }

    fn put_token(&self, token: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(ACCESS_TOKEN_KEY, token)
            .map_err(|e| StorageError::Browser(format!("{e:?}")))
    }

    fn remove_token(&self) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(ACCESS_TOKEN_KEY)
            .map_err(|e| StorageError::Browser(format!("{e:?}")))
    }
}

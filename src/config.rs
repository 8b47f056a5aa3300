//! API client configuration parsed from the environment.
//!
//! The only runtime knob is the service base URL. Browser builds bake it in
//! at compile time via [`ApiConfig::from_build_env`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const BASE_URL_ENV: &str = "ROOMBOOK_API_BASE_URL";

/// Errors produced while building an [`ApiConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL environment variable is not set.
    #[error("missing base URL: env var {var} not set")]
    MissingBaseUrl { var: String },

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build a config from an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the value parses as an
    /// absolute `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(format!("{trimmed}: unsupported scheme")));
        }
        Ok(Self { base_url: trimmed.to_owned() })
    }

    /// Build a config from `ROOMBOOK_API_BASE_URL` at runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(BASE_URL_ENV).map_err(|_| ConfigError::MissingBaseUrl { var: BASE_URL_ENV.into() })?;
        Self::new(&raw)
    }

    /// Build a config from `ROOMBOOK_API_BASE_URL` captured at compile time.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable was unset during the build or is not
    /// a valid URL.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let raw = option_env!("ROOMBOOK_API_BASE_URL").ok_or_else(|| ConfigError::MissingBaseUrl { var: BASE_URL_ENV.into() })?;
        Self::new(raw)
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

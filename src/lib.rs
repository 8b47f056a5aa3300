//! # roombook
//!
//! Typed client for the meeting-room booking REST service.
//!
//! This crate contains the envelope-unwrapping API facade (`net`), the
//! session-state context driving login/logout (`state`), the token store and
//! navigation guard (`util`), and typed configuration (`config`). Transports
//! are pluggable: `reqwest` on native targets, `gloo-net` in the browser.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

pub use config::ApiConfig;
pub use net::api::ApiClient;
pub use state::auth::{SessionContext, SessionState};

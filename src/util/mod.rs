//! Utility helpers shared by the API client and session context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (token persistence)
//! and routing decisions from network and state logic.

pub mod auth;
pub mod token_store;

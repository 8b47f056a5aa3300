//! Client-side session state.
//!
//! DESIGN
//! ======
//! State is owned by an explicit context object rather than a global store,
//! so each UI root (or test) gets its own session.

pub mod auth;

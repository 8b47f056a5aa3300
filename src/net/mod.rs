//! Networking modules for the booking service REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the facade and shared request plumbing; `auth`, `bookings`, and
//! `rooms` add one method per remote operation to it. `transport` abstracts
//! the HTTP stack and `types` defines the wire schema.

pub mod api;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod rooms;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{ApiError, TransportError};

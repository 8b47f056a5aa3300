//! Wire DTOs for the booking service REST boundary.
//!
//! DESIGN
//! ======
//! Only the account record is modelled, as a lenient view-model: every known
//! field is optional and anything unrecognized lands in `extra`. Booking and
//! room records are server-defined and travel as raw `serde_json::Value`.
//! Request bodies are strict and serialize with the server's camelCase field
//! names.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// A server-assigned record identifier, numeric or string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// An account as returned by register and profile calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Server fields this client does not model (role, timestamps, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of `POST /auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /booking/create-booking`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub room_id: RecordId,
    pub start_at: String,
    pub end_at: String,
}

/// Target and new status for `PUT /booking/update-status/{id}`.
///
/// Only `status` goes in the body; the id is a path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateBookingStatus {
    pub booking_id: RecordId,
    pub status: String,
}

/// Room fields sent on create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub room_name: String,
    pub available: bool,
}

/// Target and new fields for `PUT /room/{id}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRoom {
    pub room_id: RecordId,
    pub room: RoomPayload,
}

// =============================================================================
// LIST QUERIES
// =============================================================================

/// Sort direction accepted by list endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Pagination and ordering for list endpoints.
///
/// Defaults to page 1, 10 items, descending by `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub order: SortOrder,
    pub order_by: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10, order: SortOrder::Desc, order_by: "id".to_owned() }
    }
}

impl ListQuery {
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Query pairs in the order the server documents them.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("order", self.order.as_str().to_owned()),
            ("orderBy", self.order_by.clone()),
        ]
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// The `{success, message, data}` wrapper around every response.
///
/// `data` is kept as raw JSON until `success` has been checked.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `data` shape of register and profile responses.
#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub user: User,
}

/// `data` shape of the login response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenData {
    pub access_token: String,
}

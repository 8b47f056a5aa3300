//! Room endpoints: full CRUD plus paginated listing.
//!
//! Every call hands back the envelope's `data` untouched; room records are
//! server-defined.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use serde_json::Value;

use super::api::{ApiClient, get, json_request};
use super::error::ApiError;
use super::transport::{HttpRequest, Method, Transport};
use super::types::{ListQuery, RecordId, RoomPayload, UpdateRoom};
use crate::util::token_store::TokenStore;

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn create_room(&self, room: &RoomPayload) -> Result<Value, ApiError> {
        let url = self.endpoint(&["room"], &[])?;
        self.call(json_request(Method::Post, url, room)?).await
    }

    /// Paginated room list. Returns the whole `data` object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn get_all_rooms(&self, query: &ListQuery) -> Result<Value, ApiError> {
        let url = self.endpoint(&["room"], &query.pairs())?;
        self.call(get(url)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn get_room_by_id(&self, room_id: &RecordId) -> Result<Value, ApiError> {
        let id = room_id.to_string();
        let url = self.endpoint(&["room", &id], &[])?;
        self.call(get(url)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn update_room(&self, request: &UpdateRoom) -> Result<Value, ApiError> {
        let id = request.room_id.to_string();
        let url = self.endpoint(&["room", &id], &[])?;
        self.call(json_request(Method::Put, url, &request.room)?).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn delete_room(&self, room_id: &RecordId) -> Result<Value, ApiError> {
        let id = room_id.to_string();
        let url = self.endpoint(&["room", &id], &[])?;
        self.call(HttpRequest::new(Method::Delete, url)).await
    }
}

//! Booking endpoints.
//!
//! Status update (`PUT /booking/update-status/{id}`) and cancellation
//! (`POST /booking/cancel/{id}`) stay separate operations: cancel is a
//! one-way terminal transition on the server, status update a plain field
//! write. Status strings are passed through unvalidated, and every call
//! returns the envelope's `data` as-is.

#[cfg(test)]
#[path = "bookings_test.rs"]
mod bookings_test;

use serde_json::{Value, json};

use super::api::{APPLICATION_JSON, ApiClient, CONTENT_TYPE, get, json_request};
use super::error::ApiError;
use super::transport::{HttpRequest, Method, Transport};
use super::types::{CreateBooking, ListQuery, RecordId, UpdateBookingStatus};
use crate::util::token_store::TokenStore;

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// Reserve a room via `POST /booking/create-booking`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] when the server rejects the slot, or any
    /// storage/transport/decode failure.
    pub async fn create_booking(&self, request: &CreateBooking) -> Result<Value, ApiError> {
        let url = self.endpoint(&["booking", "create-booking"], &[])?;
        self.call(json_request(Method::Post, url, request)?).await
    }

    /// Dates with free capacity via `GET /booking/get-available-dates`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn get_available_dates(&self) -> Result<Value, ApiError> {
        let url = self.endpoint(&["booking", "get-available-dates"], &[])?;
        self.call(get(url)).await
    }

    /// Rooms free between `start_at` and `end_at` via
    /// `GET /booking/get-available-rooms`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn get_available_rooms(&self, start_at: &str, end_at: &str) -> Result<Value, ApiError> {
        let query = [("startAt", start_at.to_owned()), ("endAt", end_at.to_owned())];
        let url = self.endpoint(&["booking", "get-available-rooms"], &query)?;
        self.call(get(url)).await
    }

    /// Every booking, paginated, via `GET /booking/all-bookings`.
    ///
    /// Returns the whole `data` object: items plus pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn get_all_bookings(&self, query: &ListQuery) -> Result<Value, ApiError> {
        let url = self.endpoint(&["booking", "all-bookings"], &query.pairs())?;
        self.call(get(url)).await
    }

    /// The caller's bookings, paginated, via `GET /booking/my-bookings`.
    ///
    /// Returns the whole `data` object: items plus pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn get_owned_bookings(&self, query: &ListQuery) -> Result<Value, ApiError> {
        let url = self.endpoint(&["booking", "my-bookings"], &query.pairs())?;
        self.call(get(url)).await
    }

    /// Overwrite a booking's status via `PUT /booking/update-status/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn update_booking_status(&self, request: &UpdateBookingStatus) -> Result<Value, ApiError> {
        let id = request.booking_id.to_string();
        let url = self.endpoint(&["booking", "update-status", &id], &[])?;
        let body = json!({ "status": request.status });
        self.call(json_request(Method::Put, url, &body)?).await
    }

    /// Cancel a booking via `POST /booking/cancel/{id}`. Sends no body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] or any storage/transport/decode failure.
    pub async fn cancel_booking(&self, booking_id: &RecordId) -> Result<Value, ApiError> {
        let id = booking_id.to_string();
        let url = self.endpoint(&["booking", "cancel", &id], &[])?;
        let request = HttpRequest::new(Method::Post, url).header(CONTENT_TYPE, APPLICATION_JSON);
        self.call(request).await
    }
}

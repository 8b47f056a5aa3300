//! End-to-end checks of the reqwest transport against an in-process fake of
//! the booking service.

#![cfg(feature = "native")]

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use roombook::net::transport::ReqwestTransport;
use roombook::net::types::{ListQuery, LoginRequest, RecordId, SortOrder};
use roombook::util::auth::{Navigation, RouteMeta, guard_with_store};
use roombook::util::token_store::{MemoryTokenStore, TokenStore};
use roombook::{ApiClient, ApiConfig, SessionContext};

const TOKEN: &str = "tok-1";

fn envelope(success: bool, message: &str, data: Value) -> Json<Value> {
    Json(json!({ "success": success, "message": message, "data": data }))
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "a@b.com" && body["password"] == "x" {
        (StatusCode::OK, envelope(true, "Logged in", json!({ "access_token": TOKEN })))
    } else {
        (StatusCode::UNAUTHORIZED, envelope(false, "Invalid credentials", Value::Null))
    }
}

async fn profile(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer(&headers) == Some(TOKEN) {
        let user = json!({ "user": { "id": 1, "userName": "ab", "email": "a@b.com" } });
        (StatusCode::OK, envelope(true, "", user))
    } else {
        (StatusCode::UNAUTHORIZED, envelope(false, "Unauthorized", Value::Null))
    }
}

async fn list_rooms(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if bearer(&headers) != Some(TOKEN) {
        return envelope(false, "Unauthorized", Value::Null);
    }
    envelope(true, "", json!({ "items": [{ "id": 1, "roomName": "Aurora" }], "query": params }))
}

async fn cancel(headers: HeaderMap, Path(id): Path<String>) -> Json<Value> {
    if bearer(&headers) != Some(TOKEN) {
        return envelope(false, "Unauthorized", Value::Null);
    }
    envelope(true, "Cancelled", json!({ "id": id, "status": "cancelled" }))
}

async fn spawn_fake_service() -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/room", get(list_rooms))
        .route("/booking/cancel/{id}", post(cancel));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn session(base_url: &str, tokens: &MemoryTokenStore) -> SessionContext<ReqwestTransport, MemoryTokenStore> {
    session_with(base_url, tokens, ReqwestTransport::new())
}

fn session_with(
    base_url: &str,
    tokens: &MemoryTokenStore,
    transport: ReqwestTransport,
) -> SessionContext<ReqwestTransport, MemoryTokenStore> {
    let config = ApiConfig::new(base_url).unwrap();
    SessionContext::new(ApiClient::new(config, transport, tokens.clone()))
}

#[tokio::test]
async fn login_list_cancel_logout_round_trip() {
    let base_url = spawn_fake_service().await;
    let tokens = MemoryTokenStore::new();
    let session = session(&base_url, &tokens);

    session
        .login(&LoginRequest { email: "a@b.com".to_owned(), password: "x".to_owned() })
        .await
        .unwrap();
    assert!(session.is_authenticated());
    assert_eq!(tokens.get_token().unwrap().as_deref(), Some(TOKEN));
    assert_eq!(guard_with_store(RouteMeta::guest(), &tokens), Navigation::Redirect("/"));

    let page = session
        .api()
        .get_all_rooms(&ListQuery::default().order(SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(page["items"][0]["roomName"], "Aurora");
    assert_eq!(
        page["query"],
        json!({ "page": "1", "limit": "10", "order": "asc", "orderBy": "id" })
    );

    let cancelled = session.api().cancel_booking(&RecordId::Int(42)).await.unwrap();
    assert_eq!(cancelled, json!({ "id": "42", "status": "cancelled" }));

    session.logout();
    assert!(!tokens.has_token());
    assert_eq!(guard_with_store(RouteMeta::auth(), &tokens), Navigation::Redirect("/login"));
    assert!(!session.check_auth().await);
}

#[tokio::test]
async fn bad_credentials_surface_server_message() {
    let base_url = spawn_fake_service().await;
    let tokens = MemoryTokenStore::new();
    let session = session(&base_url, &tokens);

    let outcome = session
        .login(&LoginRequest { email: "a@b.com".to_owned(), password: "wrong".to_owned() })
        .await;

    assert_eq!(outcome, Err("Invalid credentials".to_owned()));
    assert_eq!(session.error().as_deref(), Some("Invalid credentials"));
    assert!(!tokens.has_token());
}

#[tokio::test]
async fn stale_token_is_dropped_by_check_auth() {
    let base_url = spawn_fake_service().await;
    let tokens = MemoryTokenStore::with_token("stale");
    let session = session(&base_url, &tokens);

    assert_eq!(guard_with_store(RouteMeta::auth(), &tokens), Navigation::Allow);
    assert!(!session.check_auth().await);
    assert!(!tokens.has_token());
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn unauthenticated_call_still_reaches_server() {
    let base_url = spawn_fake_service().await;
    let tokens = MemoryTokenStore::new();
    let session = session(&base_url, &tokens);

    let err = session.api().get_profile().await.unwrap_err();
    assert_eq!(err.server_message(), Some("Unauthorized"));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let tokens = MemoryTokenStore::with_token(TOKEN);
    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let session = session_with(&format!("http://{addr}"), &tokens, ReqwestTransport::with_client(http));

    let err = session.api().get_profile().await.unwrap_err();
    assert!(matches!(err, roombook::net::ApiError::Transport(_)));
}

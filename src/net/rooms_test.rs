use super::*;
use crate::net::test_helpers::{MockTransport, test_client};
use crate::util::token_store::MemoryTokenStore;
use serde_json::json;

fn aurora() -> RoomPayload {
    RoomPayload { room_name: "Aurora".to_owned(), available: true }
}

#[tokio::test]
async fn create_room_posts_name_and_availability() {
    let mock = MockTransport::new();
    mock.respond_ok(json!({ "id": 4, "roomName": "Aurora", "available": true }));
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    let room = api.create_room(&aurora()).await.unwrap();

    assert_eq!(room["id"], 4);
    let sent = mock.last_request();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "http://api.test/room");
    assert_eq!(sent.header_value("Authorization"), Some("Bearer abc"));
    assert_eq!(sent.body.as_deref(), Some(r#"{"roomName":"Aurora","available":true}"#));
}

#[tokio::test]
async fn get_all_rooms_returns_whole_page() {
    let mock = MockTransport::new();
    let page = json!({ "rooms": [{ "id": 1 }], "meta": { "total": 1 } });
    mock.respond_ok(page.clone());
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    let data = api.get_all_rooms(&ListQuery::default().limit(50)).await.unwrap();

    assert_eq!(data, page);
    assert_eq!(mock.last_request().url, "http://api.test/room?page=1&limit=50&order=desc&orderBy=id");
}

#[tokio::test]
async fn get_room_by_id_hits_member_path() {
    let mock = MockTransport::new();
    mock.respond_ok(json!({ "id": 9, "roomName": "Borealis", "available": false }));
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    let room = api.get_room_by_id(&RecordId::Int(9)).await.unwrap();

    assert_eq!(room["roomName"], "Borealis");
    assert_eq!(room["available"], false);
    let sent = mock.last_request();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.url, "http://api.test/room/9");
}

#[tokio::test]
async fn update_room_puts_fields_without_id_in_body() {
    let mock = MockTransport::new();
    mock.respond_ok(json!({ "id": 9, "roomName": "Aurora", "available": true }));
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    api.update_room(&UpdateRoom { room_id: RecordId::Int(9), room: aurora() }).await.unwrap();

    let sent = mock.last_request();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url, "http://api.test/room/9");
    assert_eq!(sent.body.as_deref(), Some(r#"{"roomName":"Aurora","available":true}"#));
}

#[tokio::test]
async fn delete_room_sends_bare_delete() {
    let mock = MockTransport::new();
    mock.respond_ok(json!(null));
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    api.delete_room(&RecordId::Int(3)).await.unwrap();

    let sent = mock.last_request();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url, "http://api.test/room/3");
    assert!(sent.body.is_none());
    assert_eq!(sent.header_value("Content-Type"), None);
}

#[tokio::test]
async fn delete_room_failure_carries_server_message() {
    let mock = MockTransport::new();
    mock.respond_err(404, "Room not found");
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    let err = api.delete_room(&RecordId::Int(3)).await.unwrap_err();
    assert!(matches!(err, ApiError::Server { ref message } if message == "Room not found"));
}

#[tokio::test]
async fn get_room_by_id_passes_null_data_through() {
    let mock = MockTransport::new();
    mock.respond_ok(json!(null));
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    assert_eq!(api.get_room_by_id(&RecordId::Int(1)).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn create_room_keeps_server_shaped_fields() {
    let mock = MockTransport::new();
    let stored = json!({ "id": 1, "roomName": "A", "available": 1 });
    mock.respond_ok(stored.clone());
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    assert_eq!(api.create_room(&aurora()).await.unwrap(), stored);
}

#[tokio::test]
async fn update_room_returns_data_verbatim() {
    let mock = MockTransport::new();
    let stored = json!({ "id": "r-9", "roomName": "Aurora", "available": "yes", "floor": { "level": 3 } });
    mock.respond_ok(stored.clone());
    let tokens = MemoryTokenStore::with_token("abc");
    let api = test_client(&mock, &tokens);

    let room = api.update_room(&UpdateRoom { room_id: RecordId::from("r-9"), room: aurora() }).await.unwrap();
    assert_eq!(room, stored);
}

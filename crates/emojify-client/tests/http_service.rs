//! End-to-end tests for `HttpEmojiService` against a local axum server.
//!
//! Each test binds an ephemeral port, serves a canned `/api/getEmojis`
//! handler, and drives the real reqwest client against it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use emojify_client::{ClientConfig, EmojiService, HttpEmojiService};
use emojify_types::{EmojiRequest, EmojifyError, GENERIC_SERVICE_MESSAGE, NETWORK_FAILURE_MESSAGE};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

async fn get_emojis(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    recorded.content_types.lock().unwrap().push(content_type);
    recorded.bodies.lock().unwrap().push(body.clone());

    match body["prompt"].as_str() {
        Some("fail") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "emojis": "bad prompt" })),
        ),
        Some("silent failure") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
        Some("wrong shape") => (StatusCode::OK, Json(json!({ "data": "🎉" }))),
        _ => (StatusCode::OK, Json(json!({ "emojis": "🎉🎈" }))),
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn recording_server() -> (String, Recorded) {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/api/getEmojis", post(get_emojis))
        .with_state(recorded.clone());
    (spawn_server(router).await, recorded)
}

fn service_for(base_url: &str) -> HttpEmojiService {
    HttpEmojiService::new(&ClientConfig::new().with_base_url(base_url)).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_returns_emoji_block_and_sends_expected_body() {
    let (base_url, recorded) = recording_server().await;
    let service = service_for(&base_url);

    let out = service
        .generate(&EmojiRequest::new("party time", 2))
        .await
        .expect("request should succeed");
    assert_eq!(out, "🎉🎈");

    let bodies = recorded.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0], json!({ "prompt": "party time", "numOfEmojis": 2 }));

    let content_types = recorded.content_types.lock().unwrap();
    assert_eq!(content_types[0], "application/json");
}

#[tokio::test]
async fn bad_request_surfaces_server_message() {
    let (base_url, _recorded) = recording_server().await;
    let service = service_for(&base_url);

    let err = service
        .generate(&EmojiRequest::new("fail", 6))
        .await
        .unwrap_err();
    assert!(matches!(err, EmojifyError::Service { status: 400, .. }));
    assert_eq!(err.user_message(), "bad prompt");
}

#[tokio::test]
async fn server_error_without_message_uses_generic_text() {
    let (base_url, _recorded) = recording_server().await;
    let service = service_for(&base_url);

    let err = service
        .generate(&EmojiRequest::new("silent failure", 6))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), Some(500));
    assert_eq!(err.user_message(), GENERIC_SERVICE_MESSAGE);
}

#[tokio::test]
async fn success_without_emojis_field_is_network_error() {
    let (base_url, _recorded) = recording_server().await;
    let service = service_for(&base_url);

    let err = service
        .generate(&EmojiRequest::new("wrong shape", 6))
        .await
        .unwrap_err();
    assert!(matches!(err, EmojifyError::Network(_)));
}

#[tokio::test]
async fn plain_text_error_page_is_network_error() {
    let router = Router::new().route(
        "/api/getEmojis",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );
    let base_url = spawn_server(router).await;
    let service = service_for(&base_url);

    let err = service
        .generate(&EmojiRequest::new("hello", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EmojifyError::Network(_)));
    assert_eq!(err.http_status(), None);
    assert_eq!(err.user_message(), NETWORK_FAILURE_MESSAGE);
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Reserve a port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let service = service_for(&format!("http://127.0.0.1:{port}"));

    let err = service
        .generate(&EmojiRequest::new("hello", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EmojifyError::Network(_)));
    assert_eq!(err.user_message(), NETWORK_FAILURE_MESSAGE);
}

#[tokio::test]
async fn slow_server_times_out_as_network_error() {
    let router = Router::new().route(
        "/api/getEmojis",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "emojis": "🐢" }))
        }),
    );
    let base_url = spawn_server(router).await;
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(200));
    let service = HttpEmojiService::new(&config).unwrap();

    let err = service
        .generate(&EmojiRequest::new("slow", 1))
        .await
        .unwrap_err();
    match err {
        EmojifyError::Network(message) => {
            assert_eq!(message, "request timed out after 200ms")
        }
        other => panic!("expected Network, got {other:?}"),
    }
}

//! API integration tests.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;
use common::{StubCompletion, test_app};

async fn send_chat(app: &Router, message: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/chat")
                .method(Method::POST)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({ "message": message })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get_history(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/history")
                .method(Method::GET)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method(Method::POST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Health endpoint works and reports the crate version.
#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(StubCompletion::replying("unused")).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .method(Method::GET)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

/// Happy path: message is stored, completion called with context, reply stored.
#[tokio::test]
async fn test_chat_happy_path() {
    let stub = StubCompletion::replying("Hi there");
    let app = test_app(stub.clone()).await;

    let (status, body) = send_chat(&app, "Hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Hi there");

    // Completion client saw the just-appended user turn
    let calls = stub.calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].role, "user");
    assert_eq!(calls[0][0].content, "Hello");
    drop(calls);

    let history = get_history(&app).await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["role"], "user");
    assert_eq!(entries[0]["message"], "Hello");
    assert_eq!(entries[1]["role"], "assistant");
    assert_eq!(entries[1]["message"], "Hi there");
    assert!(entries[0]["timestamp"].is_string());
}

/// Empty and whitespace-only messages are rejected without touching the log.
#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let stub = StubCompletion::replying("unused");
    let app = test_app(stub.clone()).await;

    for message in ["", "   "] {
        let (status, body) = send_chat(&app, message).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    let history = get_history(&app).await;
    assert!(history["history"].as_array().unwrap().is_empty());
    assert!(stub.calls.lock().await.is_empty());
}

/// A failed completion surfaces as a server error and leaves the user turn
/// in history with no assistant reply.
#[tokio::test]
async fn test_completion_failure_leaves_orphaned_user_turn() {
    let stub = StubCompletion::failing("quota exceeded for model");
    let app = test_app(stub).await;

    let (status, body) = send_chat(&app, "Hello").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // The upstream message is passed through verbatim
    assert_eq!(body["error"], "quota exceeded for model");

    let history = get_history(&app).await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["role"], "user");
    assert_eq!(entries[0]["message"], "Hello");
}

/// History preserves append order across several exchanges.
#[tokio::test]
async fn test_history_preserves_order() {
    let app = test_app(StubCompletion::replying("ok")).await;

    for message in ["one", "two", "three"] {
        let (status, _) = send_chat(&app, message).await;
        assert_eq!(status, StatusCode::OK);
    }

    let history = get_history(&app).await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 6);

    let roles: Vec<&str> = entries.iter().map(|e| e["role"].as_str().unwrap()).collect();
    assert_eq!(
        roles,
        vec!["user", "assistant", "user", "assistant", "user", "assistant"]
    );

    let user_messages: Vec<&str> = entries
        .iter()
        .filter(|e| e["role"] == "user")
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(user_messages, vec!["one", "two", "three"]);
}

/// Starting a new session clears the whole log.
#[tokio::test]
async fn test_new_session_clears_history() {
    let app = test_app(StubCompletion::replying("ok")).await;

    send_chat(&app, "one").await;
    send_chat(&app, "two").await;
    assert_eq!(get_history(&app).await["history"].as_array().unwrap().len(), 4);

    let (status, body) = post_empty(&app, "/api/chat/new").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Chat history cleared, new session started.");

    assert!(get_history(&app).await["history"].as_array().unwrap().is_empty());
}

/// Deleting history has the same effect and is idempotent.
#[tokio::test]
async fn test_delete_history_is_idempotent() {
    let app = test_app(StubCompletion::replying("ok")).await;

    send_chat(&app, "hello").await;

    let (status, body) = post_empty(&app, "/api/history/delete").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Chat history deleted.");
    assert!(get_history(&app).await["history"].as_array().unwrap().is_empty());

    // Deleting again yields the same empty-history result
    let (status, _) = post_empty(&app, "/api/history/delete").await;
    assert_eq!(status, StatusCode::OK);
    assert!(get_history(&app).await["history"].as_array().unwrap().is_empty());
}

/// History of a fresh store is empty.
#[tokio::test]
async fn test_history_empty_initially() {
    let app = test_app(StubCompletion::replying("unused")).await;
    let history = get_history(&app).await;
    assert!(history["history"].as_array().unwrap().is_empty());
}

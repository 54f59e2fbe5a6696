//! Integration tests for the OpenAI-compatible provider against an in-process server

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use intenteval_inference::{CompletionProvider, OpenAiCompatibleProvider};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    auth: Arc<Mutex<Option<String>>>,
}

/// Spawn a router on an ephemeral port and return its `/v1` base URL
async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}/v1")
}

fn provider(base_url: String, api_key: Option<&str>) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(
        "test-model".to_string(),
        base_url,
        api_key.map(str::to_string),
        5,
        200,
    )
    .expect("Failed to create provider")
}

async fn completion_handler(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    *captured.body.lock().unwrap() = Some(body);
    *captured.auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "{\"isSearch\": true, \"confidence\": 0.9}"
            }
        }]
    }))
}

#[tokio::test]
async fn test_complete_sends_request_and_returns_content() {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(completion_handler))
        .with_state(captured.clone());
    let base_url = spawn_server(app).await;

    let provider = provider(base_url, Some("sk-test"));
    let text = provider
        .complete("Is this a search?", 0.1)
        .await
        .expect("completion should succeed");

    assert_eq!(text, "{\"isSearch\": true, \"confidence\": 0.9}");

    let body = captured.body.lock().unwrap().clone().expect("request body");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["max_tokens"], 200);
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Is this a search?");
    let temperature = body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.1).abs() < 1e-6);

    assert_eq!(
        captured.auth.lock().unwrap().as_deref(),
        Some("Bearer sk-test")
    );
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(completion_handler))
        .with_state(captured);
    let base_url = spawn_server(app).await;

    let provider = provider(format!("{base_url}/"), None);
    assert!(provider.complete("hi", 0.0).await.is_ok());
}

#[tokio::test]
async fn test_server_error_is_invalid_response() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::BAD_REQUEST, "model not loaded") }),
    );
    let base_url = spawn_server(app).await;

    let err = provider(base_url, None)
        .complete("hi", 0.1)
        .await
        .expect_err("400 must fail");
    assert!(!err.is_unavailable());
    assert!(err.to_string().contains("400"));
}

#[tokio::test]
async fn test_service_unavailable_is_unavailable() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "warming up") }),
    );
    let base_url = spawn_server(app).await;

    let err = provider(base_url, None)
        .complete("hi", 0.1)
        .await
        .expect_err("503 must fail");
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let base_url = spawn_server(app).await;

    let err = provider(base_url, None)
        .complete("hi", 0.1)
        .await
        .expect_err("empty choices must fail");
    assert!(!err.is_unavailable());
    assert!(err.to_string().contains("no content"));
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    // Bind then drop to get a port nobody is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(format!("http://{addr}/v1"), None)
        .complete("hi", 0.1)
        .await
        .expect_err("closed port must fail");
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_health_check_does_not_fail_when_down() {
    let app = Router::new().route("/v1/models", get(|| async { StatusCode::NOT_FOUND }));
    let base_url = spawn_server(app).await;

    // Only logs; must return normally either way
    provider(base_url, None).check_health().await;
}

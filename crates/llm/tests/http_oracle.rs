use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use call_qc_core::{Oracle, OracleError};
use call_qc_llm::{ChatCompletionsOracle, OracleReply};
use serde_json::{json, Value};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn oracle(addr: SocketAddr, timeout: Duration) -> ChatCompletionsOracle {
    ChatCompletionsOracle::new(&format!("http://{}/v1", addr), "test-model", "secret", timeout).unwrap()
}

#[tokio::test]
async fn test_returns_first_choice_content() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(
                headers.get("authorization").and_then(|v| v.to_str().ok()),
                Some("Bearer secret")
            );
            assert_eq!(body["model"], "test-model");
            assert_eq!(body["messages"][0]["role"], "system");
            let criterion = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();
            Json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": format!("```json\n{{\"score\": 3, \"reasoning\": \"{}\", \"evidence\": \"\", \"probability\": \"HIGH\"}}\n```", criterion)
                    }
                }]
            }))
        }),
    );
    let addr = spawn(app).await;

    let raw = oracle(addr, Duration::from_secs(5))
        .complete("system prompt", "KR2.1")
        .await
        .unwrap();
    let reply = OracleReply::parse(&raw).unwrap();
    assert_eq!(reply.score, 3);
    assert_eq!(reply.reasoning, "KR2.1");
}

#[tokio::test]
async fn test_non_success_status() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
    );
    let addr = spawn(app).await;

    let err = oracle(addr, Duration::from_secs(5))
        .complete("s", "u")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OracleError::Status {
            status: 429,
            body: "rate limited".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_choices() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let addr = spawn(app).await;

    let err = oracle(addr, Duration::from_secs(5))
        .complete("s", "u")
        .await
        .unwrap_err();
    assert_eq!(err, OracleError::EmptyResponse);
}

#[tokio::test]
async fn test_timeout() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"choices": []}))
        }),
    );
    let addr = spawn(app).await;

    let err = oracle(addr, Duration::from_millis(200))
        .complete("s", "u")
        .await
        .unwrap_err();
    assert_eq!(err, OracleError::Timeout(200));
}

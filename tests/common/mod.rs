#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use chat_relay::config::Config;
use chat_relay::state::{AppState, SharedState};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

pub const TEST_IMAGE_KEY: &str = "test-google-key";

pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Fake custom-search endpoint.
///
/// `nothing` yields no items, `boom` a 500, `garbage` a non-JSON body.
/// Anything else finds `http://x/<q>.jpg`, except `mountains`, which finds
/// `http://x/y.jpg`.
pub async fn spawn_image_backend() -> SocketAddr {
    async fn search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, String) {
        if params.get("key").map(String::as_str) != Some(TEST_IMAGE_KEY)
            || params.get("searchType").map(String::as_str) != Some("image")
            || params.get("num").map(String::as_str) != Some("1")
            || !params.contains_key("cx")
        {
            return (StatusCode::BAD_REQUEST, json!({"error": "bad params"}).to_string());
        }
        let q = params.get("q").cloned().unwrap_or_default();
        match q.as_str() {
            "nothing" | "" => (StatusCode::OK, json!({"kind": "customsearch#search"}).to_string()),
            "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded".to_string()),
            "garbage" => (StatusCode::OK, "<html>not json</html>".to_string()),
            "mountains" => (StatusCode::OK, json!({"items": [{"link": "http://x/y.jpg"}]}).to_string()),
            other => (
                StatusCode::OK,
                json!({"items": [{"link": format!("http://x/{other}.jpg")}, {"link": "http://x/second.jpg"}]})
                    .to_string(),
            ),
        }
    }

    spawn_app(Router::new().route("/customsearch/v1", get(search))).await
}

/// Fake OpenAI-compatible backend.
///
/// Only `gpt-4o-mini` resolves. Prompts: `hello` -> `hi there`, `fail` -> 500,
/// `empty` -> null content, `slow <x>` -> `echo: slow <x>` after a delay,
/// anything else -> `echo: <prompt>`.
pub async fn spawn_chat_backend() -> SocketAddr {
    async fn model(Path(model): Path<String>) -> (StatusCode, Json<Value>) {
        if model == "gpt-4o-mini" {
            (StatusCode::OK, Json(json!({"id": model, "object": "model"})))
        } else {
            (StatusCode::NOT_FOUND, Json(json!({"error": {"message": "model not found"}})))
        }
    }

    async fn completions(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let prompt = body["messages"][0]["content"].as_str().unwrap_or_default().to_string();
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["model"], "gpt-4o-mini");

        let content = match prompt.as_str() {
            "fail" => {
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})));
            }
            "empty" => Value::Null,
            "hello" => json!("hi there"),
            p if p.starts_with("slow ") => {
                tokio::time::sleep(Duration::from_millis(200)).await;
                json!(format!("echo: {p}"))
            }
            p => json!(format!("echo: {p}")),
        };
        (
            StatusCode::OK,
            Json(json!({"choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]})),
        )
    }

    let app = Router::new()
        .route("/v1/models/{model}", get(model))
        .route("/v1/chat/completions", post(completions));
    spawn_app(app).await
}

pub fn test_config(image: SocketAddr, chat: SocketAddr, with_image_credentials: bool) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("OPENAI_API_KEY", "sk-test".into());
    vars.insert("OPENAI_BASE_URL", format!("http://{chat}/v1"));
    vars.insert("IMAGE_SEARCH_URL", format!("http://{image}/customsearch/v1"));
    if with_image_credentials {
        vars.insert("GOOGLE_API_KEY", TEST_IMAGE_KEY.into());
        vars.insert("GOOGLE_SEARCH_ENGINE_ID", "test-cx".into());
    }
    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

pub async fn test_state(with_image_credentials: bool) -> SharedState {
    let image = spawn_image_backend().await;
    let chat = spawn_chat_backend().await;
    AppState::shared(&test_config(image, chat, with_image_credentials))
}

use crate::config::Config;
use crate::model::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("authentication rejected (HTTP {0})")]
    Auth(StatusCode),
    #[error("upstream returned HTTP {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("invalid completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

// `Ok(None)` means the endpoint answered with zero choices.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Option<String>, CompletionError>;
}

pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, config.api_key.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Option<String>, CompletionError> {
        let body = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
            temperature,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CompletionError::Auth(status));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Upstream { status, body });
        }

        let text = resp.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;

        Ok(parsed.choices.into_iter().next().map(|c| c.message.content.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Seen {
        body: Arc<Mutex<Option<Value>>>,
        auth: Arc<Mutex<Option<String>>>,
    }

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    async fn reply_ok(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *seen.body.lock().unwrap() = Some(body);
        *seen.auth.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        Json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "optimized" } }],
            "usage": { "prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4 }
        }))
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(
            OpenAiClient::new("https://api.openai.com/v1/", "k").endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            OpenAiClient::new("http://localhost:3001", "k").endpoint(),
            "http://localhost:3001/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request() {
        let seen = Seen::default();
        let app = Router::new()
            .route("/v1/chat/completions", post(reply_ok))
            .with_state(seen.clone());
        let base = spawn(app).await;

        let client = OpenAiClient::new(&base, "sk-test");
        let out = client.complete("gpt-test", "hello", 10240, 0.7).await.unwrap();
        assert_eq!(out.as_deref(), Some("optimized"));

        let body = seen.body.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["max_tokens"], 10240);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(seen.auth.lock().unwrap().as_deref(), Some("Bearer sk-test"));
    }

    #[tokio::test]
    async fn test_zero_choices_is_none() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = spawn(app).await;

        let out = OpenAiClient::new(&base, "k").complete("m", "p", 1, 0.7).await.unwrap();
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn test_null_content_is_empty_string() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(json!({
                    "choices": [{
                        "message": { "role": "assistant", "content": null },
                        "finish_reason": "content_filter"
                    }],
                    "usage": { "prompt_tokens": 12, "completion_tokens": null }
                }))
            }),
        );
        let base = spawn(app).await;

        let out = OpenAiClient::new(&base, "k").complete("m", "p", 1, 0.7).await.unwrap();
        assert_eq!(out.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        use axum::http::StatusCode as S;

        let app = Router::new()
            .route("/auth/chat/completions", post(|| async { (S::UNAUTHORIZED, "bad key") }))
            .route("/down/chat/completions", post(|| async { (S::BAD_GATEWAY, "overloaded") }))
            .route("/junk/chat/completions", post(|| async { "not json" }));
        let base = spawn(app).await;
        let root = base.trim_end_matches("/v1");

        let err = OpenAiClient::new(&format!("{}/auth", root), "k")
            .complete("m", "p", 1, 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Auth(s) if s == StatusCode::UNAUTHORIZED));

        let err = OpenAiClient::new(&format!("{}/down", root), "k")
            .complete("m", "p", 1, 0.7)
            .await
            .unwrap_err();
        match err {
            CompletionError::Upstream { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = OpenAiClient::new(&format!("{}/junk", root), "k")
            .complete("m", "p", 1, 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = OpenAiClient::new(&format!("http://{}", addr), "k")
            .complete("m", "p", 1, 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Network(_)));
    }
}

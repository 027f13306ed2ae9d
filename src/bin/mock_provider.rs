// Usage: mock_provider <port> [latency_ms] [json|noisy|plain]

use anyhow::{bail, Context};
use axum::{extract::State, routing::post, Json, Router};
use rand::Rng;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Clone, Copy, Debug)]
enum Mode {
    Json,
    Noisy,
    Plain,
}

#[derive(Clone)]
struct ServerConfig {
    latency_ms: u64,
    mode: Mode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let port: u16 = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("3001")
        .parse()
        .context("port must be a number")?;
    let latency_ms: u64 = args
        .get(2)
        .map(String::as_str)
        .unwrap_or("300")
        .parse()
        .context("latency_ms must be a number")?;
    let mode = match args.get(3).map(String::as_str).unwrap_or("json") {
        "json" => Mode::Json,
        "noisy" => Mode::Noisy,
        "plain" => Mode::Plain,
        other => bail!("unknown mode `{}`", other),
    };

    let config = ServerConfig { latency_ms, mode };

    let app = Router::new()
        .route("/chat/completions", post(handler))
        .route("/v1/chat/completions", post(handler))
        .with_state(config);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!(
        "Mock provider on {}. Latency: {}ms, Mode: {:?}",
        addr,
        latency_ms,
        mode
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handler(State(config): State<ServerConfig>, Json(req): Json<Value>) -> Json<Value> {
    let jitter = rand::thread_rng().gen_range(0..=20);
    sleep(Duration::from_millis(config.latency_ms + jitter)).await;

    let input = req["messages"][0]["content"].as_str().unwrap_or_default();
    let structured = json!({
        "optimized_prompt": format!("You are an expert assistant.\n\n{}", input),
        "usage_guide": "Paste the optimized prompt into a new conversation.",
        "test_cases": [
            { "input": "A typical request", "expected_behavior": "A focused, well-structured answer" }
        ],
        "model_versions": { "claude": "", "gpt": "", "gemini": "", "deepseek": "" },
        "optimization_notes": "Added a role and an explicit output format.",
        "metadata": {
            "complexity_level": "medium",
            "task_type": "general",
            "estimated_tokens": input.len() / 4,
            "target_models": [],
            "techniques_used": ["role prompting"]
        }
    });

    let content = match config.mode {
        Mode::Json => structured.to_string(),
        Mode::Noisy => format!("Here is the result:\n```json\n{:#}\n```", structured),
        Mode::Plain => format!("You are an expert assistant.\n\n{}", input),
    };

    Json(json!({
        "id": "mock-response",
        "object": "chat.completion",
        "created": 1677652288,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 10, "total_tokens": 20 }
    }))
}

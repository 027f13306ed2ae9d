use anyhow::Context;
use prompt_optimizer::completion::OpenAiClient;
use prompt_optimizer::config::Config;
use prompt_optimizer::gateway::{self, AppState};
use prompt_optimizer::optimizer::Optimizer;
use prompt_optimizer::prompt::MetaPrompts;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Real environment variables win over .env entries. Loaded first so RUST_LOG applies.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    debug!("Loading configuration");
    let config = Config::from_env()?;
    let addr = config.listen_addr()?;
    info!(?config, "Configuration loaded");

    let client = OpenAiClient::from_config(&config);
    let optimizer = Optimizer::new(Arc::new(client), MetaPrompts::default(), config.model.clone());
    let app = gateway::router(Arc::new(AppState { optimizer }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Prompt optimizer listening on {}", addr);
    info!("V1: http://localhost:{}/", config.port);
    info!("V2: http://localhost:{}/v2", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}

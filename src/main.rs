use std::sync::Arc;
use std::time::Duration;

use newsfront::AppState;
use newsfront::api::create_router;
use newsfront::config::Config;
use newsfront::news::NewsClient;
use newsfront::view::IndexTemplate;

/// Page size requested from the remote index on every search.
const PAGE_SIZE: u32 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    if dotenvy::dotenv().is_err() {
        tracing::warn!("no .env file found, using the process environment only");
    }

    let config = Config::from_env()?;

    // One pooled client for every outbound call, with the per-request ceiling.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let news = NewsClient::new(http, config.api_key.clone(), PAGE_SIZE);

    // Template problems must stop the process before it accepts connections.
    let template = IndexTemplate::load("templates/index.html")?;

    let state = Arc::new(AppState { news, template });
    let router = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

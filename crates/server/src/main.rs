use server::clients::GateSource;
use server::config;
use server::sessions::SessionStore;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;

    let source = GateSource::from_config(&config).context("Failed to set up puzzle source")?;
    match &config.source {
        config::SourceKind::Lichess => {
            tracing::info!("Puzzle source: Lichess API at {}", config.lichess_base_url)
        }
        config::SourceKind::File(path) => {
            tracing::info!("Puzzle source: local file {}", path.display())
        }
    }

    let app = server::app(config.clone(), source, SessionStore::new());

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

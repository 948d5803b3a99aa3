use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use image_service::{router, AppState, Config, ImageStore, ReplicateProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    let store = ImageStore::create(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    if config.replicate_token.is_empty() {
        tracing::warn!("REPLICATE_API_TOKEN is not set, generation requests will fail");
    }

    let state = Arc::new(AppState::new(ReplicateProvider::new(&config), store));
    let app = router(state, Some(&config.static_dir));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("Server running on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}

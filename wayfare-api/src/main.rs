use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use wayfare_api::{app, AppState};
use wayfare_infra::{app_config::Config, HttpTravelBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=debug,wayfare_core=info,wayfare_infra=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Wayfare planner on port {}", config.server.port);

    if config.secrets.google_api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; the travel backend may reject searches");
    }
    if config.secrets.serp_api_key.is_none() {
        tracing::warn!("SERP_API_KEY is not set; the travel backend may reject searches");
    }

    tracing::info!("Travel backend at {}", config.backend.base_url);
    let backend = HttpTravelBackend::new(config.backend.clone(), config.secrets.clone())
        .context("Failed to create travel backend client")?;

    let app = app(AppState::new(Arc::new(backend)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

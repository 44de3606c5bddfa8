use std::sync::Arc;
use std::net::SocketAddr;
use anyhow::Context;
use footprint_api::{app, worker, AppState};
use footprint_store::{app_config::Config, InMemoryProductRepository, ProductRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SWEEP_INTERVAL_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footprint_api=debug,footprint_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Footprint storefront on port {}", config.server.port);

    let products: Arc<dyn ProductRepository> = match &config.catalog.seed_path {
        Some(path) => Arc::new(
            InMemoryProductRepository::from_json_file(path)
                .await
                .with_context(|| format!("Failed to load catalog from {}", path))?,
        ),
        None => {
            tracing::info!("No catalog seed configured, using built-in catalog");
            Arc::new(InMemoryProductRepository::seeded())
        }
    };

    let app_state = AppState::new(&config.storefront, products);
    tracing::info!(
        "Default mode {}, MOQ {} pairs",
        config.storefront.default_mode,
        config.storefront.moq_pairs
    );

    tokio::spawn(worker::start_session_sweeper(
        app_state.sessions.clone(),
        tokio::time::Duration::from_secs(SWEEP_INTERVAL_SECS),
    ));

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

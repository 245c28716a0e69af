// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use solar_dashboard::application::dashboard_service::DashboardService;
use solar_dashboard::application::series_store::TimeSeriesStore;
use solar_dashboard::infrastructure::config::load_dashboard_config;
use solar_dashboard::presentation::app_state::AppState;
use solar_dashboard::presentation::handlers::router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config("config/dashboard")?;
    let settings = config.dashboard;
    let sources = settings.resolution_sources()?;

    if sources.is_empty() {
        tracing::warn!("No sources configured; every resolution is disabled");
    }

    // Create store (application layer) over the configured transport
    let fetcher = settings.build_fetcher()?;
    let store = Arc::new(TimeSeriesStore::new(fetcher, sources).with_delimiter(settings.delimiter));

    // Fill the cache up front so the summary table covers every resolution
    let loaded = store.preload_all().await;
    tracing::info!(
        "Preloaded {} of {} resolutions from {}",
        loaded,
        store.enabled_resolutions().len(),
        settings.base
    );

    let state = Arc::new(AppState {
        dashboard_service: DashboardService::new(store),
    });

    let addr: SocketAddr = settings
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", settings.bind))?;
    tracing::info!("Starting solar-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}

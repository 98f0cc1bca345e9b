//! Rentora booking service entry point.
//!
//! Reads configuration from TOML file (~/.config/booking-service/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use rentora_booking::config::AppConfig;
use rentora_booking::domain::RepositoryProvider;
use rentora_booking::{
    create_api_router, default_config_path, listen_for_shutdown_signals, start_housekeeping_task,
    BookingService, InMemoryStore, ShutdownSignal,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("RENTORA_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Rentora Booking Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Storage ────────────────────────────────────────────────
    let store = Arc::new(InMemoryStore::new());
    if app_cfg.store.seed_demo_data {
        store.seed_demo_data();
        info!("Seeded demo resources into the in-memory store");
    }
    let repos: Arc<dyn RepositoryProvider> = store;

    // ── Services ───────────────────────────────────────────────
    let booking_service = Arc::new(BookingService::new(repos.clone()));

    // Shutdown signal shared by every long-lived task
    let shutdown_signal = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown_signal.clone()));

    start_housekeeping_task(
        repos.clone(),
        shutdown_signal.clone(),
        app_cfg.housekeeping.sweep_interval_secs,
    );

    // ── REST API server with graceful shutdown ─────────────────
    let api_router = create_api_router(repos, booking_service, prometheus_handle);

    let api_addr = app_cfg.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let api_shutdown = shutdown_signal.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await?;

    info!("👋 Rentora Booking Service shutdown complete");
    Ok(())
}

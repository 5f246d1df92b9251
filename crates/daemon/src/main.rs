//! Fruits Catalog - Main Entry Point

mod config;
mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use config::DaemonConfig;
use fruits_api_http::{HttpServer, HttpServerConfig};
use fruits_core::application::FruitCatalog;
use fruits_core::port::SystemTimeProvider;
use fruits_infra_sqlite::{create_pool, run_migrations, FixtureLoader, SqliteFruitRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::load()?;

    // 2. Initialize logging
    telemetry::init_tracing(&config.log_format)?;
    info!("Fruits catalog v{} starting...", VERSION);

    // 3. Initialize database
    let database_url = config.database_url();
    if !config.is_in_memory() {
        if let Some(parent) = std::path::Path::new(&database_url).parent() {
            std::fs::create_dir_all(parent)?;
        }
    }
    info!(db_path = %database_url, "Initializing database...");

    let pool = create_pool(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Optional fixture seeding
    let time_provider = Arc::new(SystemTimeProvider);
    if let Some(path) = &config.fixtures {
        let loaded = FixtureLoader::new(pool.clone())
            .with_time_provider(time_provider.clone())
            .recreate_tables(true)
            .load(path)
            .await
            .map_err(|e| anyhow::anyhow!("Fixture load failed: {}", e))?;
        info!(rows = loaded.len(), path = %path.display(), "Database seeded from fixtures");
    }

    // 5. Setup dependencies (DI wiring)
    let fruit_repo = Arc::new(SqliteFruitRepository::new(pool.clone(), time_provider));
    let catalog = FruitCatalog::new(fruit_repo, config.storage_timeout());

    // 6. Start HTTP server
    let http_config = HttpServerConfig {
        host: config.http_host.clone(),
        port: config.http_port,
        cors_permissive: config.cors_permissive,
    };
    let http_handle = HttpServer::new(http_config, catalog)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server start failed: {}", e))?;

    info!(addr = %http_handle.local_addr(), "System ready. Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    shutdown_signal().await;
    info!("Shutdown signal received. Exiting gracefully...");

    // 8. Graceful shutdown
    http_handle
        .stop()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server stop failed: {}", e))?;
    pool.close().await;

    info!("Shutdown complete.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

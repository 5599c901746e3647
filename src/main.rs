//! Swap Optimizer Sidecar - Main Entry Point
//!
//! Serves /healthz, /readyz and /metrics next to the route optimizer.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use swap_optimizer_sidecar::*;
use swap_optimizer_sidecar::telemetry::CountingAllocator;
use tracing::{error, info};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = CONFIG.clone();

    // Initialize logging
    utils::setup_output_directories(&config.log_dir)?;
    let _logging_guard = utils::setup_logging(&config)?;

    info!("🩺 Swap Optimizer Sidecar v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Port: {}", config.port);
    info!("   Heartbeat log: {}", config.heartbeat_log.display());
    info!("   Routes log: {}", config.routes_log.display());
    info!("   Readiness RPC timeout: {}s", config.rpc_timeout_secs);
    info!(
        "   App log: {} (prefix {}, {:?} rotation)",
        config.log_dir.display(),
        config.app_log_prefix,
        config.app_log_rotation
    );

    let start_time = Instant::now();
    let provider = network::setup_provider(&config)?;
    let chain: Arc<dyn network::ChainClient> = provider;

    let state = AppState::new(&config, chain.clone());
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on port {}", config.port);

    let uptime = tasks::spawn_uptime_reporter(start_time, config.uptime_log_interval());
    let heartbeat = tasks::spawn_heartbeat_writer(
        storage::HeartbeatLog::new(&config.heartbeat_log),
        config.heartbeat_interval(),
    );
    tokio::spawn(async move {
        network::test_connection(chain.as_ref()).await;
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("📛 Received shutdown signal (Ctrl+C)..."),
                Err(e) => {
                    error!("Failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
        .context("HTTP server failed")?;

    heartbeat.abort();
    uptime.abort();

    info!("🛑 Shut down after {}", utils::format_duration(start_time.elapsed().as_secs()));
    Ok(())
}

//! Futures Order Desk - Entry Point
//!
//! Composition root: everything with a process lifetime is built here
//! and handed down explicitly. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load `.env` (credentials) and config.toml + validate
//! 2. Init tracing (JSON structured logging, optional audit file)
//! 3. Load exchange credentials from env (BINANCE_API_KEY, BINANCE_API_SECRET)
//! 4. Create BinanceFuturesClient (HTTP + signing + concurrency cap)
//! 5. Create OrderSubmitter around it (ExchangeClient port)
//! 6. Serve the order form, /live, /ready, /metrics
//! 7. Wait for SIGINT → readiness 503 → drain in-flight requests → exit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use futures_order_desk::adapters::api::{BinanceAuth, BinanceClientConfig, BinanceFuturesClient};
use futures_order_desk::adapters::logging;
use futures_order_desk::adapters::metrics::MetricsRegistry;
use futures_order_desk::adapters::web::{self, AppState, HealthState};
use futures_order_desk::config;
use futures_order_desk::usecases::OrderSubmitter;

/// Env var naming an alternative config file.
const CONFIG_PATH_VAR: &str = "ORDER_DESK_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Credentials file + configuration ─────────────────
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config_path =
        std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {config_path}"))?;

    // ── 2. Initialize structured logging ────────────────────
    logging::init_tracing(&config.app)?;

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        testnet = config.exchange.testnet,
        dotenv = dotenv_loaded,
        log_file = config.app.log_file.as_deref().unwrap_or("-"),
        "Starting futures order desk"
    );

    if !config.exchange.testnet {
        warn!("Testnet disabled, orders go to the LIVE exchange");
    }

    // ── 3. Exchange credentials ─────────────────────────────
    let auth = Arc::new(
        BinanceAuth::from_env().context("Failed to load exchange credentials from env")?,
    );

    // ── 4. Exchange client ──────────────────────────────────
    let client = Arc::new(
        BinanceFuturesClient::new(auth, BinanceClientConfig::from(&config.exchange))
            .context("Failed to create exchange client")?,
    );

    // ── 5. Order submitter (ExchangeClient port) ────────────
    let submitter = OrderSubmitter::new(client);

    // ── 6. Web form + probes + metrics ──────────────────────
    let metrics = if config.metrics.enabled {
        Some(Arc::new(MetricsRegistry::new().context("Failed to register metrics")?))
    } else {
        None
    };
    let health = Arc::new(HealthState::new());
    let state = AppState::new(
        submitter,
        config.server.max_orders_per_minute,
        metrics,
        Arc::clone(&health),
        &config.app.name,
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let bind_address = config.server.bind_address.clone();
    let mut server_handle = tokio::spawn(async move {
        web::serve(state, &bind_address, shutdown_rx).await
    });

    info!("Order desk is running");

    // ── 7. Wait for SIGINT (or an early server failure) ─────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
        res = &mut server_handle => {
            return match res {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(e) => Err(anyhow::anyhow!("Server task panicked: {e}")),
            };
        }
    }

    // 1. Mark readiness as unhealthy (probe → 503)
    health.mark_shutting_down();

    // 2. Stop accepting connections; in-flight submissions finish
    let _ = shutdown_tx.send(());

    // 3. Wait for the server to drain (up to 30s)
    match tokio::time::timeout(std::time::Duration::from_secs(30), server_handle).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => error!(error = %e, "Server exited with error"),
        Ok(Err(e)) => error!(error = %e, "Server task panicked"),
        Err(_) => warn!("Server did not drain within 30s"),
    }

    info!("Shutdown complete");
    Ok(())
}

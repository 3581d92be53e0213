//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Longest `recvWindow` the exchange accepts.
const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    testnet = config.exchange.testnet,
    base_url = %config.exchange.base_url(),
    bind = %config.server.bind_address,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  if let Some(path) = &config.app.log_file {
    anyhow::ensure!(!path.trim().is_empty(), "app.log_file must not be blank when set");
  }

  // Server validation
  anyhow::ensure!(
    !config.server.bind_address.is_empty(),
    "server.bind_address must not be empty"
  );
  anyhow::ensure!(
    config.server.max_orders_per_minute > 0,
    "server.max_orders_per_minute must be positive"
  );

  // Exchange validation
  anyhow::ensure!(
    config.exchange.recv_window_ms > 0
      && config.exchange.recv_window_ms <= MAX_RECV_WINDOW_MS,
    "exchange.recv_window_ms must be in (0, {}], got {}",
    MAX_RECV_WINDOW_MS,
    config.exchange.recv_window_ms
  );
  anyhow::ensure!(
    config.exchange.timeout_ms > 0,
    "exchange.timeout_ms must be positive"
  );
  anyhow::ensure!(
    config.exchange.max_concurrent > 0,
    "exchange.max_concurrent must be positive"
  );
  anyhow::ensure!(
    config.exchange.base_url().starts_with("http"),
    "exchange base URL must be http(s), got {}",
    config.exchange.base_url()
  );

  Ok(())
}

//! Configuration Module - TOML-based Application Configuration
//!
//! Loads and validates configuration from `config.toml`. Credentials
//! are never part of the file: they come from the environment (or a
//! `.env` file) at the composition root.

pub mod loader;

use serde::Deserialize;

/// Production USDⓈ-M futures REST endpoint.
pub const MAINNET_BASE_URL: &str = "https://fapi.binance.com";

/// Futures testnet REST endpoint (same API shape as production).
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Application identity and logging.
  #[serde(default)]
  pub app: AppSection,
  /// Web form server.
  #[serde(default)]
  pub server: ServerConfig,
  /// Exchange connectivity.
  #[serde(default)]
  pub exchange: ExchangeConfig,
  /// Metrics and monitoring.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable name, used in logs and the page title.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Emit JSON log lines instead of human-readable ones.
  #[serde(default = "default_true")]
  pub log_json: bool,
  /// Audit log file receiving every event as JSON, alongside stdout.
  #[serde(default)]
  pub log_file: Option<String>,
}

/// Web form server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Listen address for the form, health and metrics routes.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
  /// Orders accepted per minute before the form answers "try again".
  #[serde(default = "default_max_orders")]
  pub max_orders_per_minute: u32,
}

/// Exchange connectivity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
  /// Route orders to the futures testnet.
  #[serde(default = "default_true")]
  pub testnet: bool,
  /// Explicit REST base URL; overrides `testnet` when non-empty.
  #[serde(default)]
  pub base_url: String,
  /// `recvWindow` sent with every signed request (milliseconds).
  #[serde(default = "default_recv_window")]
  pub recv_window_ms: u64,
  /// HTTP request timeout (milliseconds).
  #[serde(default = "default_timeout")]
  pub timeout_ms: u64,
  /// Maximum concurrent in-flight requests to the exchange.
  #[serde(default = "default_max_concurrent")]
  pub max_concurrent: usize,
}

impl ExchangeConfig {
  /// Effective REST base URL.
  pub fn base_url(&self) -> &str {
    if !self.base_url.is_empty() {
      &self.base_url
    } else if self.testnet {
      TESTNET_BASE_URL
    } else {
      MAINNET_BASE_URL
    }
  }
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Expose `/metrics` in Prometheus text format.
  #[serde(default = "default_true")]
  pub enabled: bool,
}

impl Default for AppSection {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
      log_json: true,
      log_file: None,
    }
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: default_bind_address(),
      max_orders_per_minute: default_max_orders(),
    }
  }
}

impl Default for ExchangeConfig {
  fn default() -> Self {
    Self {
      testnet: true,
      base_url: String::new(),
      recv_window_ms: default_recv_window(),
      timeout_ms: default_timeout(),
      max_concurrent: default_max_concurrent(),
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self { enabled: true }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "futures-order-desk".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

const fn default_true() -> bool {
  true
}

fn default_bind_address() -> String {
  "127.0.0.1:5000".to_string()
}

const fn default_max_orders() -> u32 {
  60
}

const fn default_recv_window() -> u64 {
  5_000
}

const fn default_timeout() -> u64 {
  10_000
}

const fn default_max_concurrent() -> usize {
  4
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_base_url_resolution() {
    let mut cfg = ExchangeConfig::default();
    assert_eq!(cfg.base_url(), TESTNET_BASE_URL);

    cfg.testnet = false;
    assert_eq!(cfg.base_url(), MAINNET_BASE_URL);

    cfg.base_url = "http://localhost:8080".to_string();
    assert_eq!(cfg.base_url(), "http://localhost:8080");
  }
}

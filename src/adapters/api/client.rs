//! Futures HTTP Client - Signed Order Submission
//!
//! Wraps reqwest with request signing and a concurrency cap for the
//! USDⓈ-M futures `POST /fapi/v1/order` endpoint, and implements the
//! `ExchangeClient` port on top of it.
//!
//! Unlike read endpoints, order placement is never retried here: a
//! timeout or 5xx leaves the order's fate unknown, and resending could
//! open a second position.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use super::auth::BinanceAuth;
use super::types::{ApiErrorBody, OrderAck};
use crate::config::ExchangeConfig;
use crate::ports::exchange::{
  ExchangeClient, ExchangeError, OrderConfirmation, OrderParams,
};

/// New-order endpoint path.
pub const ORDER_PATH: &str = "/fapi/v1/order";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Appended to every transport failure shown to the user.
const OUTCOME_UNKNOWN: &str = "order outcome unknown, check open orders before resubmitting";

/// Configuration for the futures HTTP client.
#[derive(Debug, Clone)]
pub struct BinanceClientConfig {
  /// REST base URL (production or testnet).
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// `recvWindow` for signed requests (milliseconds).
  pub recv_window_ms: u64,
  /// Maximum concurrent requests.
  pub max_concurrent: usize,
}

impl From<&ExchangeConfig> for BinanceClientConfig {
  fn from(config: &ExchangeConfig) -> Self {
    Self {
      base_url: config.base_url().trim_end_matches('/').to_string(),
      timeout: Duration::from_millis(config.timeout_ms),
      recv_window_ms: config.recv_window_ms,
      max_concurrent: config.max_concurrent,
    }
  }
}

/// Signed HTTP client for the futures order API.
pub struct BinanceFuturesClient {
  /// Underlying HTTP client.
  http: Client,
  /// Credentials and signer.
  auth: Arc<BinanceAuth>,
  /// Client configuration.
  config: BinanceClientConfig,
  /// Concurrency limiter.
  semaphore: Arc<Semaphore>,
}

impl BinanceFuturesClient {
  /// Create a new futures client.
  pub fn new(auth: Arc<BinanceAuth>, config: BinanceClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(5)
      .build()
      .context("Failed to build HTTP client")?;

    let semaphore = Arc::new(Semaphore::new(config.max_concurrent));

    Ok(Self {
      http,
      auth,
      config,
      semaphore,
    })
  }

  /// Url-encode the order parameters, add `recvWindow` and `timestamp`,
  /// and append the signature over exactly that string.
  pub fn signed_body(&self, params: &OrderParams, timestamp_ms: i64) -> Result<String, ExchangeError> {
    let mut pairs = params.to_pairs();
    pairs.push(("recvWindow", self.config.recv_window_ms.to_string()));
    pairs.push(("timestamp", timestamp_ms.to_string()));

    let query = serde_urlencoded::to_string(&pairs)
      .map_err(|e| ExchangeError::Transport(format!("failed to encode parameters: {e}")))?;
    let signature = self.auth.sign(&query);

    Ok(format!("{query}&signature={signature}"))
  }
}

#[async_trait]
impl ExchangeClient for BinanceFuturesClient {
  #[instrument(skip(self, params), fields(symbol = %params.symbol))]
  async fn submit_order(
    &self,
    params: &OrderParams,
  ) -> Result<OrderConfirmation, ExchangeError> {
    let _permit = self
      .semaphore
      .acquire()
      .await
      .map_err(|_| ExchangeError::Transport("exchange client is shutting down".to_string()))?;

    let body = self.signed_body(params, BinanceAuth::timestamp_ms())?;
    let url = format!("{}{}", self.config.base_url, ORDER_PATH);

    debug!(url = %url, "Sending order");

    let response = self
      .http
      .post(&url)
      .header(API_KEY_HEADER, self.auth.api_key())
      .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(body)
      .send()
      .await
      .map_err(|e| {
        warn!(error = %e, timeout = e.is_timeout(), "Order request failed");
        ExchangeError::Transport(format!("{e}; {OUTCOME_UNKNOWN}"))
      })?;

    let status = response.status();
    let text = response
      .text()
      .await
      .map_err(|e| ExchangeError::Transport(format!("failed to read response: {e}; {OUTCOME_UNKNOWN}")))?;

    classify_response(status, &text)
  }
}

/// Turn an HTTP status and body into a confirmation or a typed error.
///
/// - 2xx with an `orderId` → confirmation
/// - 2xx without one → `MalformedResponse`
/// - 4xx (including 418/429 rate limits) → `Rejected`
/// - anything else → `Transport`
pub fn classify_response(
  status: StatusCode,
  body: &str,
) -> Result<OrderConfirmation, ExchangeError> {
  if status.is_success() {
    let raw: serde_json::Value = serde_json::from_str(body)
      .map_err(|e| ExchangeError::MalformedResponse(format!("invalid JSON: {e}")))?;
    let ack: OrderAck = serde_json::from_value(raw.clone())
      .map_err(|_| ExchangeError::MalformedResponse("confirmation has no orderId".to_string()))?;

    return Ok(OrderConfirmation {
      order_id: ack.order_id.to_string(),
      raw,
    });
  }

  if status.is_client_error() {
    return Err(match serde_json::from_str::<ApiErrorBody>(body) {
      Ok(err) => ExchangeError::Rejected {
        code: Some(err.code),
        message: err.msg,
      },
      Err(_) => ExchangeError::Rejected {
        code: None,
        message: status_message(status, body),
      },
    });
  }

  Err(ExchangeError::Transport(format!(
    "{}; {OUTCOME_UNKNOWN}",
    status_message(status, body)
  )))
}

fn status_message(status: StatusCode, body: &str) -> String {
  let body = body.trim();
  if body.is_empty() {
    format!("HTTP {status}")
  } else {
    format!("HTTP {status}: {body}")
  }
}

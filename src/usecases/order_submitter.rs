//! Order Submitter - Validated Request to Exchange Outcome
//!
//! Maps a validated `OrderRequest` onto the exchange's parameter set,
//! makes exactly one submission through the `ExchangeClient` port and
//! folds whatever happens into a `SubmissionResult` value:
//! - MARKET: symbol, side, type, quantity
//! - LIMIT: + price, timeInForce=GTC
//! - STOP-LIMIT: + stopPrice, price, timeInForce=GTC
//!
//! There is no retry here. Order placement is not idempotent without a
//! client order id, and a timed-out submission may still have filled.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::domain::order::{OrderKind, OrderRequest};
use crate::ports::exchange::{
  ExchangeClient, ExchangeError, OrderParams, TimeInForce,
};

/// Which side of the boundary a failed submission failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// The exchange refused the order. Safe to show verbatim.
  ExchangeRejected,
  /// Network or unexpected failure. Outcome of the order is unknown.
  Transport,
}

impl FailureKind {
  /// Stable label for logs and metrics.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::ExchangeRejected => "exchange_rejected",
      Self::Transport => "transport",
    }
  }
}

/// Outcome of one order submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
  Success {
    exchange_order_id: String,
    raw_response: serde_json::Value,
  },
  Failure {
    kind: FailureKind,
    message: String,
  },
}

impl SubmissionResult {
  pub const fn is_success(&self) -> bool {
    matches!(self, Self::Success { .. })
  }

  /// Metrics label: `success` or the failure kind.
  pub const fn outcome_label(&self) -> &'static str {
    match self {
      Self::Success { .. } => "success",
      Self::Failure { kind, .. } => kind.as_str(),
    }
  }
}

/// Submits validated orders through an injected exchange client.
///
/// Stateless apart from the client handle; one instance serves any
/// number of concurrent requests.
pub struct OrderSubmitter<E: ExchangeClient> {
  /// Exchange port.
  exchange: Arc<E>,
}

impl<E: ExchangeClient> Clone for OrderSubmitter<E> {
  fn clone(&self) -> Self {
    Self {
      exchange: Arc::clone(&self.exchange),
    }
  }
}

impl<E: ExchangeClient> OrderSubmitter<E> {
  /// Create a submitter around an exchange client.
  pub const fn new(exchange: Arc<E>) -> Self {
    Self { exchange }
  }

  /// Build the exchange parameter set for a request.
  pub fn build_params(req: &OrderRequest) -> OrderParams {
    let (price, stop_price, time_in_force) = match req.kind() {
      OrderKind::Market => (None, None, None),
      OrderKind::Limit => (req.price(), None, Some(TimeInForce::Gtc)),
      OrderKind::StopLimit => {
        (req.price(), req.stop_price(), Some(TimeInForce::Gtc))
      }
    };

    OrderParams {
      symbol: req.symbol().to_string(),
      side: req.side(),
      kind: req.kind(),
      quantity: req.quantity(),
      price,
      stop_price,
      time_in_force,
    }
  }

  /// Submit an order once and report the outcome as a value.
  ///
  /// Takes the request by value: a request is sent at most once.
  #[instrument(skip(self, req), fields(symbol = %req.symbol(), side = %req.side(), kind = %req.kind()))]
  pub async fn submit(&self, req: OrderRequest) -> SubmissionResult {
    let params = Self::build_params(&req);
    info!(params = ?params.to_pairs(), "Submitting order");

    match self.exchange.submit_order(&params).await {
      Ok(confirmation) => {
        info!(
          order_id = %confirmation.order_id,
          response = %confirmation.raw,
          "Order accepted"
        );
        SubmissionResult::Success {
          exchange_order_id: confirmation.order_id,
          raw_response: confirmation.raw,
        }
      }
      Err(ExchangeError::Rejected { code, message }) => {
        warn!(code = ?code, reason = %message, "Order rejected by exchange");
        SubmissionResult::Failure {
          kind: FailureKind::ExchangeRejected,
          message,
        }
      }
      Err(e @ (ExchangeError::Transport(_) | ExchangeError::MalformedResponse(_))) => {
        error!(error = %e, "Order submission failed, outcome unknown");
        SubmissionResult::Failure {
          kind: FailureKind::Transport,
          message: e.to_string(),
        }
      }
    }
  }
}

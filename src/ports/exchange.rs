//! Exchange Port - Futures Order Submission Interface
//!
//! The one operation the core needs from an exchange: submit a fully
//! formed order parameter set and get back either a confirmation or
//! an error. Parameter names and values follow the USDⓈ-M futures REST
//! vocabulary exactly (`type=STOP`, `timeInForce=GTC`, camelCase keys).
//!
//! Key design decisions:
//! - Submission is NOT idempotent: implementors must not retry it
//! - Errors are split into business rejections and everything else,
//!   because only the former proves the order was not placed

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::order::{OrderKind, OrderSide};

/// Order validity policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    /// Good till cancelled.
    Gtc,
}

impl TimeInForce {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
        }
    }
}

/// Exchange-native parameter set for a new order.
///
/// Built only by the submitter from a validated request, so optional
/// fields are present exactly when the order type needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderParams {
    pub symbol: String,
    pub side: OrderSide,
    pub kind: OrderKind,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
}

impl OrderParams {
    /// Key/value pairs in wire form, in a stable order.
    ///
    /// Decimals are rendered in plain notation without trailing zeros
    /// (`0.01`, `50000`), which is what the exchange's filters expect.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.kind.exchange_type().to_string()),
            ("quantity", render_decimal(self.quantity)),
        ];

        if let Some(price) = self.price {
            pairs.push(("price", render_decimal(price)));
        }
        if let Some(stop_price) = self.stop_price {
            pairs.push(("stopPrice", render_decimal(stop_price)));
        }
        if let Some(tif) = self.time_in_force {
            pairs.push(("timeInForce", tif.as_str().to_string()));
        }

        pairs
    }

    /// Look up a single wire parameter by its exchange key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.to_pairs()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

fn render_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Confirmation of an accepted order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// Exchange-assigned order identifier.
    pub order_id: String,
    /// Full response body as returned by the exchange.
    pub raw: serde_json::Value,
}

/// Failure modes of an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// The exchange processed the request and refused it
    /// (bad symbol, insufficient margin, rate limit, filter failure...).
    /// The order was not placed.
    #[error("{message}")]
    Rejected {
        /// Exchange error code, when one was provided.
        code: Option<i64>,
        /// Human-readable reason, safe to show to the user.
        message: String,
    },

    /// The request may or may not have reached the exchange.
    #[error("transport error: {0}")]
    Transport(String),

    /// The exchange answered with something that is not a usable
    /// confirmation (e.g. no order id).
    #[error("malformed exchange response: {0}")]
    MalformedResponse(String),
}

/// Trait for futures order-submission providers.
///
/// Implementors perform exactly one remote submission per call.
#[async_trait]
pub trait ExchangeClient: Send + Sync + 'static {
    /// Submit a new order.
    ///
    /// # Errors
    /// `Rejected` when the exchange refused the order, `Transport` or
    /// `MalformedResponse` when the outcome could not be established.
    async fn submit_order(
        &self,
        params: &OrderParams,
    ) -> Result<OrderConfirmation, ExchangeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pairs_render_plain_decimals() {
        let params = OrderParams {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Sell,
            kind: OrderKind::Limit,
            quantity: dec!(0.0100),
            price: Some(dec!(50000.00)),
            stop_price: None,
            time_in_force: Some(TimeInForce::Gtc),
        };

        assert_eq!(
            params.to_pairs(),
            vec![
                ("symbol", "BTCUSDT".to_string()),
                ("side", "SELL".to_string()),
                ("type", "LIMIT".to_string()),
                ("quantity", "0.01".to_string()),
                ("price", "50000".to_string()),
                ("timeInForce", "GTC".to_string()),
            ]
        );
        assert_eq!(params.get("stopPrice"), None);
    }

    #[test]
    fn test_rejection_displays_message_verbatim() {
        let err = ExchangeError::Rejected {
            code: Some(-2019),
            message: "Margin is insufficient.".to_string(),
        };
        assert_eq!(err.to_string(), "Margin is insufficient.");
    }
}

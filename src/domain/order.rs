//! Core order domain types.
//!
//! Defines the strongly-typed order request that every form submission
//! must be turned into before anything is sent to the exchange.
//! `OrderRequest::new` is the only way to build one, so a request that
//! violates the required-field-per-kind rule cannot exist.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

// ────────────────────────────────────────────
// Enums
// ────────────────────────────────────────────

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Exchange wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = ValidationError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(ValidationError::InvalidEnum("side", raw.to_string())),
        }
    }
}

/// Order kind as offered on the form.
///
/// `StopLimit` is a limit order that rests until the stop price trades;
/// the futures API calls it `STOP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    Market,
    Limit,
    StopLimit,
}

impl OrderKind {
    /// Exchange `type` parameter value.
    pub const fn exchange_type(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopLimit => "STOP",
        }
    }

    /// Whether a limit price must accompany this kind.
    pub const fn requires_price(self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit)
    }

    /// Whether a stop (trigger) price must accompany this kind.
    pub const fn requires_stop_price(self) -> bool {
        matches!(self, Self::StopLimit)
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
            Self::StopLimit => write!(f, "STOP-LIMIT"),
        }
    }
}

impl FromStr for OrderKind {
    type Err = ValidationError;

    /// Accepts `STOP-LIMIT`, `STOP_LIMIT` and `STOP LIMIT` in any case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        match normalized.as_str() {
            "MARKET" => Ok(Self::Market),
            "LIMIT" => Ok(Self::Limit),
            "STOP-LIMIT" => Ok(Self::StopLimit),
            _ => Err(ValidationError::InvalidEnum("order_type", raw.to_string())),
        }
    }
}

// ────────────────────────────────────────────
// OrderRequest
// ────────────────────────────────────────────

/// A validated futures order, ready to be mapped onto exchange parameters.
///
/// Immutable once built. Consumed by value by the submitter so a single
/// form submission can only ever be sent once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    symbol: String,
    side: OrderSide,
    kind: OrderKind,
    quantity: Decimal,
    price: Option<Decimal>,
    stop_price: Option<Decimal>,
}

impl OrderRequest {
    /// Build a request, enforcing every structural invariant.
    ///
    /// The symbol is trimmed and uppercased. Prices the kind does not use
    /// are dropped rather than rejected, matching how the form leaves the
    /// price boxes populated when the user switches back to MARKET.
    ///
    /// # Errors
    /// - `MissingField` if the symbol is blank or a price the kind needs is absent
    /// - `InvalidNumber` if quantity or a needed price is not strictly positive
    pub fn new(
        symbol: &str,
        side: OrderSide,
        kind: OrderKind,
        quantity: Decimal,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        let symbol = symbol.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol"));
        }

        if quantity <= Decimal::ZERO {
            return Err(ValidationError::InvalidNumber(
                "quantity",
                quantity.to_string(),
            ));
        }

        let price = if kind.requires_price() {
            Some(require_positive("price", price)?)
        } else {
            None
        };

        let stop_price = if kind.requires_stop_price() {
            Some(require_positive("stop_price", stop_price)?)
        } else {
            None
        };

        Ok(Self {
            symbol,
            side,
            kind,
            quantity,
            price,
            stop_price,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub const fn side(&self) -> OrderSide {
        self.side
    }

    pub const fn kind(&self) -> OrderKind {
        self.kind
    }

    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Limit price; `Some` exactly when the kind requires one.
    pub const fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// Trigger price; `Some` only for stop-limit orders.
    pub const fn stop_price(&self) -> Option<Decimal> {
        self.stop_price
    }
}

fn require_positive(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(v) if v <= Decimal::ZERO => {
            Err(ValidationError::InvalidNumber(field, v.to_string()))
        }
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_parsing_is_case_insensitive() {
        assert_eq!("buy".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!(" Sell ".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!(
            "hold".parse::<OrderSide>(),
            Err(ValidationError::InvalidEnum("side", "hold".to_string()))
        );
    }

    #[test]
    fn test_kind_accepts_stop_limit_spellings() {
        for raw in ["STOP-LIMIT", "stop_limit", "Stop Limit", " stop-limit "] {
            assert_eq!(raw.parse::<OrderKind>().unwrap(), OrderKind::StopLimit);
        }
        assert!("STOPLIMIT".parse::<OrderKind>().is_err());
        assert!("STOP".parse::<OrderKind>().is_err());
    }

    #[test]
    fn test_kind_exchange_vocabulary() {
        assert_eq!(OrderKind::Market.exchange_type(), "MARKET");
        assert_eq!(OrderKind::Limit.exchange_type(), "LIMIT");
        assert_eq!(OrderKind::StopLimit.exchange_type(), "STOP");
    }

    #[test]
    fn test_market_drops_prices() {
        let req = OrderRequest::new(
            " ethusdt ",
            OrderSide::Sell,
            OrderKind::Market,
            dec!(2),
            Some(dec!(3000)),
            Some(dec!(2900)),
        )
        .unwrap();
        assert_eq!(req.symbol(), "ETHUSDT");
        assert_eq!(req.price(), None);
        assert_eq!(req.stop_price(), None);
    }

    #[test]
    fn test_limit_requires_price() {
        let err = OrderRequest::new(
            "BTCUSDT",
            OrderSide::Buy,
            OrderKind::Limit,
            dec!(1),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("price"));
    }

    #[test]
    fn test_stop_limit_requires_both_prices() {
        let err = OrderRequest::new(
            "BTCUSDT",
            OrderSide::Buy,
            OrderKind::StopLimit,
            dec!(1),
            Some(dec!(50000)),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("stop_price"));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let err = OrderRequest::new(
            "BTCUSDT",
            OrderSide::Buy,
            OrderKind::Market,
            dec!(0),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber("quantity", _)));
    }

    #[test]
    fn test_blank_symbol_rejected() {
        let err = OrderRequest::new(
            "   ",
            OrderSide::Buy,
            OrderKind::Market,
            dec!(1),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("symbol"));
    }
}

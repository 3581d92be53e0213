//! Request Validator - Raw Form Fields to `OrderRequest`
//!
//! Turns the untyped string map posted by the order form into a
//! validated `OrderRequest`. Rules run in a fixed order and the first
//! failure wins, so the user always sees exactly one error.
//!
//! Field names are the contract with the form:
//! `symbol`, `side`, `order_type`, `quantity`, `price`, `stop_price`.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::ValidationError;
use super::order::{OrderKind, OrderRequest, OrderSide};

pub const FIELD_SYMBOL: &str = "symbol";
pub const FIELD_SIDE: &str = "side";
pub const FIELD_ORDER_TYPE: &str = "order_type";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_STOP_PRICE: &str = "stop_price";

/// Validate raw form input into an `OrderRequest`.
///
/// Pure and deterministic. Fields the chosen order kind does not use
/// are never read, so a stale `price` left on a MARKET submission
/// cannot cause a rejection.
///
/// # Errors
/// The first rule violated, in field order.
pub fn validate(raw: &HashMap<String, String>) -> Result<OrderRequest, ValidationError> {
    let field = |name: &str| raw.get(name).map(String::as_str);

    let symbol = field(FIELD_SYMBOL).map(str::trim).unwrap_or_default();
    if symbol.is_empty() {
        return Err(ValidationError::MissingField(FIELD_SYMBOL));
    }

    let side = OrderSide::from_str(field(FIELD_SIDE).unwrap_or_default())?;
    let kind = OrderKind::from_str(field(FIELD_ORDER_TYPE).unwrap_or_default())?;

    let quantity = parse_positive(FIELD_QUANTITY, field(FIELD_QUANTITY).unwrap_or_default())?;

    let price = if kind.requires_price() {
        Some(required_positive(FIELD_PRICE, field(FIELD_PRICE))?)
    } else {
        None
    };

    let stop_price = if kind.requires_stop_price() {
        Some(required_positive(FIELD_STOP_PRICE, field(FIELD_STOP_PRICE))?)
    } else {
        None
    };

    OrderRequest::new(symbol, side, kind, quantity, price, stop_price)
}

/// Absent or blank is `MissingField`; anything else must parse positive.
fn required_positive(
    name: &'static str,
    raw: Option<&str>,
) -> Result<Decimal, ValidationError> {
    match raw {
        Some(value) if !value.trim().is_empty() => parse_positive(name, value),
        _ => Err(ValidationError::MissingField(name)),
    }
}

/// Parse a strictly positive decimal, reporting the untouched input on failure.
///
/// Plain notation only. Input that cannot be held exactly is rejected, never
/// rounded to a different order size.
fn parse_positive(name: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidNumber(name, raw.to_string());

    let text = raw.trim();
    if !is_plain_decimal(text) {
        return Err(invalid());
    }
    let value = Decimal::from_str_exact(text).map_err(|_| invalid())?;
    if value <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(value.normalize())
}

/// `[+-]?digits[.digits]`: no exponent, separators or bare dots.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, frac) = match unsigned.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (unsigned, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && frac.is_none_or(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form(fields: &[(&str, &str)]) -> HashMap<String, String> {
        fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn market(quantity: &str) -> HashMap<String, String> {
        form(&[
            ("symbol", "btcusdt"),
            ("side", "buy"),
            ("order_type", "MARKET"),
            ("quantity", quantity),
        ])
    }

    #[test]
    fn test_market_order_normalized() {
        let req = validate(&market("0.01")).unwrap();
        assert_eq!(req.symbol(), "BTCUSDT");
        assert_eq!(req.side(), OrderSide::Buy);
        assert_eq!(req.kind(), OrderKind::Market);
        assert_eq!(req.quantity(), dec!(0.01));
        assert_eq!(req.price(), None);
    }

    #[test]
    fn test_missing_symbol_wins_over_later_errors() {
        let raw = form(&[("side", "hold"), ("quantity", "abc")]);
        assert_eq!(validate(&raw), Err(ValidationError::MissingField("symbol")));
    }

    #[test]
    fn test_side_variants() {
        for side in ["buy", "BUY", " Buy "] {
            let mut raw = market("1");
            raw.insert("side".into(), side.into());
            assert_eq!(validate(&raw).unwrap().side(), OrderSide::Buy);
        }

        let mut raw = market("1");
        raw.insert("side".into(), "hold".into());
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidEnum("side", "hold".to_string()))
        );
    }

    #[test]
    fn test_missing_side_is_invalid_enum() {
        let raw = form(&[("symbol", "BTCUSDT"), ("order_type", "MARKET"), ("quantity", "1")]);
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidEnum("side", String::new()))
        );
    }

    #[test]
    fn test_unknown_order_type_rejected() {
        let mut raw = market("1");
        raw.insert("order_type".into(), "TRAILING".into());
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidEnum("order_type", "TRAILING".to_string()))
        );
    }

    #[test]
    fn test_bad_quantities() {
        for q in [
            "0",
            "-1",
            "abc",
            "",
            "NaN",
            "inf",
            "1e3",
            "1E-2",
            "1_000",
            "1,000",
            ".5",
            "5.",
            "0x10",
            "1.000000000000000000000000000001",
            "99999999999999999999999999999",
        ] {
            assert_eq!(
                validate(&market(q)),
                Err(ValidationError::InvalidNumber("quantity", q.to_string())),
                "quantity {q:?} should be rejected"
            );
        }
        assert_eq!(validate(&market("1.5")).unwrap().quantity(), dec!(1.5));
        assert_eq!(validate(&market(" +2.50 ")).unwrap().quantity(), dec!(2.5));
    }

    #[test]
    fn test_limit_price_rules() {
        let mut raw = market("1");
        raw.insert("order_type".into(), "LIMIT".into());
        assert_eq!(validate(&raw), Err(ValidationError::MissingField("price")));

        raw.insert("price".into(), "  ".into());
        assert_eq!(validate(&raw), Err(ValidationError::MissingField("price")));

        raw.insert("price".into(), "cheap".into());
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidNumber("price", "cheap".to_string()))
        );

        for bad in ["6.5e4", "65_000"] {
            raw.insert("price".into(), bad.into());
            assert_eq!(
                validate(&raw),
                Err(ValidationError::InvalidNumber("price", bad.to_string()))
            );
        }

        raw.insert("price".into(), "65000.50".into());
        let req = validate(&raw).unwrap();
        assert_eq!(req.price(), Some(dec!(65000.5)));
        assert_eq!(req.stop_price(), None);
    }

    #[test]
    fn test_stop_limit_requires_both_prices() {
        let mut raw = market("1");
        raw.insert("order_type".into(), "STOP-LIMIT".into());
        raw.insert("stop_price".into(), "49000".into());
        assert_eq!(validate(&raw), Err(ValidationError::MissingField("price")));

        raw.remove("stop_price");
        raw.insert("price".into(), "50000".into());
        assert_eq!(validate(&raw), Err(ValidationError::MissingField("stop_price")));

        raw.insert("stop_price".into(), "0".into());
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidNumber("stop_price", "0".to_string()))
        );

        raw.insert("stop_price".into(), "49000".into());
        let req = validate(&raw).unwrap();
        assert_eq!(req.kind(), OrderKind::StopLimit);
        assert_eq!(req.price(), Some(dec!(50000)));
        assert_eq!(req.stop_price(), Some(dec!(49000)));
    }

    #[test]
    fn test_market_ignores_garbage_prices() {
        let mut raw = market("1");
        raw.insert("price".into(), "not a number".into());
        raw.insert("stop_price".into(), "-5".into());
        assert!(validate(&raw).is_ok());
    }
}

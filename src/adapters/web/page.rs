//! Order form page rendering.
//!
//! A single self-contained HTML page: the order form plus an optional
//! flash banner with the outcome of the last submission. Every piece of
//! user or exchange text is escaped before interpolation.

use std::collections::HashMap;
use std::fmt::Write;

use crate::domain::validator::{
    FIELD_ORDER_TYPE, FIELD_PRICE, FIELD_QUANTITY, FIELD_SIDE, FIELD_STOP_PRICE,
    FIELD_SYMBOL,
};

/// Banner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Danger,
}

impl FlashKind {
    const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// One-shot message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            message: message.into(),
        }
    }
}

const SIDES: [&str; 2] = ["BUY", "SELL"];
const ORDER_TYPES: [&str; 3] = ["MARKET", "LIMIT", "STOP-LIMIT"];

/// Render the full page. `fields` pre-fills the inputs so a rejected
/// form does not have to be typed again.
pub fn render(title: &str, flash: Option<&Flash>, fields: &HashMap<String, String>) -> String {
    let value = |name: &str| escape(fields.get(name).map_or("", String::as_str));

    let banner = flash.map_or_else(String::new, |f| {
        format!(
            r#"<div class="flash {}">{}</div>"#,
            f.kind.css_class(),
            escape(&f.message)
        )
    });

    let side = fields.get(FIELD_SIDE).map(|s| s.trim().to_ascii_uppercase());
    let order_type = fields
        .get(FIELD_ORDER_TYPE)
        .map(|s| s.trim().to_ascii_uppercase());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 28rem; margin: 2rem auto; }}
label {{ display: block; margin-top: .75rem; }}
input, select {{ width: 100%; padding: .35rem; }}
.flash {{ padding: .6rem; border-radius: 4px; }}
.success {{ background: #d1e7dd; color: #0f5132; }}
.danger {{ background: #f8d7da; color: #842029; }}
</style>
</head>
<body>
<h1>{title}</h1>
{banner}
<form method="post" action="/">
<label>Symbol <input name="{FIELD_SYMBOL}" value="{symbol}" placeholder="BTCUSDT" required></label>
<label>Side <select name="{FIELD_SIDE}">{side_options}</select></label>
<label>Order type <select name="{FIELD_ORDER_TYPE}">{type_options}</select></label>
<label>Quantity <input name="{FIELD_QUANTITY}" value="{quantity}" inputmode="decimal" required></label>
<label>Price <input name="{FIELD_PRICE}" value="{price}" inputmode="decimal"></label>
<label>Stop price <input name="{FIELD_STOP_PRICE}" value="{stop_price}" inputmode="decimal"></label>
<p><button type="submit">Place order</button></p>
</form>
</body>
</html>
"#,
        title = escape(title),
        symbol = value(FIELD_SYMBOL),
        quantity = value(FIELD_QUANTITY),
        price = value(FIELD_PRICE),
        stop_price = value(FIELD_STOP_PRICE),
        side_options = options(&SIDES, side.as_deref()),
        type_options = options(&ORDER_TYPES, order_type.as_deref()),
    )
}

fn options(choices: &[&str], selected: Option<&str>) -> String {
    let mut out = String::new();
    for choice in choices {
        let marker = if Some(*choice) == selected { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{choice}"{marker}>{choice}</option>"#);
    }
    out
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_flash_rendered_escaped() {
        let html = render(
            "Desk",
            Some(&Flash::danger("Order Failed: <bad>")),
            &HashMap::new(),
        );
        assert!(html.contains(r#"<div class="flash danger">Order Failed: &lt;bad&gt;</div>"#));
    }

    #[test]
    fn test_fields_prefilled_and_selected() {
        let fields: HashMap<String, String> = [
            ("symbol", "btcusdt"),
            ("side", "sell"),
            ("order_type", "stop-limit"),
            ("quantity", "0.5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let html = render("Desk", None, &fields);
        assert!(html.contains(r#"name="symbol" value="btcusdt""#));
        assert!(html.contains(r#"<option value="SELL" selected>SELL</option>"#));
        assert!(html.contains(r#"<option value="STOP-LIMIT" selected>STOP-LIMIT</option>"#));
        assert!(!html.contains(r#"class="flash"#));
    }
}

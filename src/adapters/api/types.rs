//! Futures API Response Types
//!
//! Serialization types for the parts of the futures REST responses the
//! order adapter reads. Everything else is kept as raw JSON.

use serde::Deserialize;

/// Error body returned with 4xx responses, e.g.
/// `{"code":-2019,"msg":"Margin is insufficient."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Exchange error code (negative).
    pub code: i64,
    /// Human-readable reason.
    pub msg: String,
}

/// The fields of a new-order acknowledgement we depend on.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderAck {
    /// Exchange-assigned order id.
    #[serde(rename = "orderId")]
    pub order_id: OrderIdField,
}

/// Order ids are numeric on the futures API; accept strings too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderIdField {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for OrderIdField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

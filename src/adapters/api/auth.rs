//! Exchange Authentication - HMAC-SHA256 Request Signing
//!
//! Signs every private futures API request: the signature is the
//! hex-encoded HMAC-SHA256 of the exact url-encoded parameter string,
//! keyed with the API secret. Credentials come from environment
//! variables (BINANCE_API_KEY, BINANCE_API_SECRET).

use anyhow::{Context, Result};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "BINANCE_API_KEY";

/// Environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

/// Futures API credentials and signer.
///
/// The secret never leaves this struct: only signatures do, and the
/// `Debug` impl redacts it.
pub struct BinanceAuth {
    /// API key, sent as the `X-MBX-APIKEY` header.
    api_key: String,
    /// API secret (never sent, never logged).
    api_secret: String,
}

impl BinanceAuth {
    /// Create from explicit credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required env vars: BINANCE_API_KEY, BINANCE_API_SECRET.
    /// These belong in `.env` (never committed to git).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .with_context(|| format!("{API_KEY_VAR} not set"))?;
        let api_secret = std::env::var(API_SECRET_VAR)
            .with_context(|| format!("{API_SECRET_VAR} not set"))?;

        anyhow::ensure!(!api_key.trim().is_empty(), "{API_KEY_VAR} is empty");
        anyhow::ensure!(!api_secret.trim().is_empty(), "{API_SECRET_VAR} is empty");

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key for request headers.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a url-encoded parameter string.
    ///
    /// Signature format: hex(HMAC-SHA256(secret, payload)).
    pub fn sign(&self, payload: &str) -> String {
        let mac = hmac_sha256::HMAC::mac(payload.as_bytes(), self.api_secret.as_bytes());
        hex::encode(mac)
    }

    /// Current Unix time in milliseconds, for the `timestamp` parameter.
    pub fn timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl std::fmt::Debug for BinanceAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceAuth")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_matches_published_example() {
        let auth = BinanceAuth::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A",
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
        );
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1\
                     &price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            auth.sign(query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = BinanceAuth::new("key", "super-secret");
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("key"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_timestamp_is_millis() {
        // Anything after 2020-01-01 in ms.
        assert!(BinanceAuth::timestamp_ms() > 1_577_836_800_000);
    }
}

//! Futures Exchange API Adapter
//!
//! Implements the `ExchangeClient` port against the USDⓈ-M futures REST
//! API (production or testnet). Handles request signing, submission and
//! response classification.
//!
//! Sub-modules:
//! - `auth`: HMAC-SHA256 request signing
//! - `client`: signed HTTP client implementing `ExchangeClient`
//! - `types`: API response type definitions

pub mod auth;
pub mod client;
pub mod types;

pub use auth::BinanceAuth;
pub use client::{BinanceClientConfig, BinanceFuturesClient};

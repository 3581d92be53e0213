//! Web Adapter - Order Entry Form over HTTP
//!
//! The user-facing surface: an HTML order form served by axum 0.7,
//! plus health probes and the metrics endpoint on the same listener.

pub mod health;
pub mod page;
pub mod server;

pub use health::HealthState;
pub use server::{router, serve, AppState};

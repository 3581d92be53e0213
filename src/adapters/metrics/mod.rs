//! Metrics and Monitoring Adapters
//!
//! Prometheus metrics for the order desk, served by the web adapter on
//! `/metrics` next to the `/live` and `/ready` probes.

pub mod prometheus;

pub use prometheus::MetricsRegistry;

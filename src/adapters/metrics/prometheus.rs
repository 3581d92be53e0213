//! Prometheus Metrics Registry - Order Desk Observability
//!
//! Counts validation failures per field, submissions per outcome and
//! local rate-limit refusals, and times the exchange round-trip.
//! Rendered in text exposition format on `/metrics`.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Centralized Prometheus metrics for the order desk.
///
/// All metrics follow the naming convention `order_desk_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Form submissions rejected before reaching the exchange.
    pub validation_failures: IntCounterVec,
    /// Exchange submissions by outcome.
    pub submissions: IntCounterVec,
    /// Exchange round-trip latency (milliseconds).
    pub submit_latency_ms: Histogram,
    /// Submissions refused by the local order-rate quota.
    pub rate_limited: IntCounter,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let validation_failures = IntCounterVec::new(
            Opts::new(
                "order_desk_validation_failures_total",
                "Order forms rejected by validation",
            ),
            &["field"],
        )?;

        let submissions = IntCounterVec::new(
            Opts::new(
                "order_desk_submissions_total",
                "Orders submitted to the exchange",
            ),
            &["outcome"],
        )?;

        let submit_latency_ms = Histogram::with_opts(
            HistogramOpts::new(
                "order_desk_submit_latency_ms",
                "Exchange order submission latency in milliseconds",
            )
            .buckets(vec![
                10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 10000.0,
            ]),
        )?;

        let rate_limited = IntCounter::new(
            "order_desk_rate_limited_total",
            "Orders refused by the local order-rate quota",
        )?;

        registry.register(Box::new(validation_failures.clone()))?;
        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(submit_latency_ms.clone()))?;
        registry.register(Box::new(rate_limited.clone()))?;

        Ok(Self {
            registry,
            validation_failures,
            submissions,
            submit_latency_ms,
            rate_limited,
        })
    }

    /// Render all metrics in Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

//! Order Validation Benchmarks - Request Hot Path
//!
//! Benchmarks the pure work done for every form submission before the
//! exchange round-trip: field validation and parameter building.
//!
//! Run with: cargo bench --bench validation_bench

use std::collections::HashMap;

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use futures_order_desk::domain::validate;
use futures_order_desk::ports::exchange::{
    ExchangeClient, ExchangeError, OrderConfirmation, OrderParams,
};
use futures_order_desk::usecases::OrderSubmitter;

struct NoExchange;

#[async_trait]
impl ExchangeClient for NoExchange {
    async fn submit_order(
        &self,
        _params: &OrderParams,
    ) -> Result<OrderConfirmation, ExchangeError> {
        Err(ExchangeError::Transport("benchmark".to_string()))
    }
}

fn stop_limit_form() -> HashMap<String, String> {
    [
        ("symbol", " btcusdt "),
        ("side", "sell"),
        ("order_type", "stop-limit"),
        ("quantity", "0.125"),
        ("price", "50000.50"),
        ("stop_price", "49000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Benchmark validating a full stop-limit form.
fn bench_validate(c: &mut Criterion) {
    let form = stop_limit_form();

    c.bench_function("validate_stop_limit", |b| {
        b.iter(|| {
            let _req = validate(black_box(&form));
        });
    });
}

/// Benchmark validation failing on the last rule.
fn bench_validate_rejection(c: &mut Criterion) {
    let mut form = stop_limit_form();
    form.insert("stop_price".to_string(), "not-a-price".to_string());

    c.bench_function("validate_bad_stop_price", |b| {
        b.iter(|| {
            let _err = validate(black_box(&form));
        });
    });
}

/// Benchmark building and encoding exchange parameters.
fn bench_build_params(c: &mut Criterion) {
    let req = validate(&stop_limit_form()).expect("benchmark form is valid");

    c.bench_function("build_params_to_pairs", |b| {
        b.iter(|| {
            let params = OrderSubmitter::<NoExchange>::build_params(black_box(&req));
            let _pairs = params.to_pairs();
        });
    });
}

criterion_group!(
    benches,
    bench_validate,
    bench_validate_rejection,
    bench_build_params,
);
criterion_main!(benches);

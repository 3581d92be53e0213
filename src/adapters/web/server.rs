//! Order Form Server - axum Routes and Handlers
//!
//! Routes:
//! - `GET /`        - empty order form
//! - `POST /`       - validate, rate-check, submit, re-render with a flash
//! - `GET /live`    - liveness probe
//! - `GET /ready`   - readiness probe (503 once shutdown starts)
//! - `GET /metrics` - Prometheus text format (404 when disabled)
//!
//! A submission runs on its own task: if the browser disconnects the
//! handler future is dropped, but the order already on its way to the
//! exchange is not abandoned halfway.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tokio::sync::broadcast;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::health::{liveness, readiness_response, HealthState};
use super::page::{self, Flash};
use crate::adapters::metrics::MetricsRegistry;
use crate::domain::validator::validate;
use crate::ports::exchange::ExchangeClient;
use crate::usecases::order_submitter::{FailureKind, OrderSubmitter, SubmissionResult};

/// Message shown when the local order quota is exhausted.
pub const RATE_LIMITED_MESSAGE: &str = "Order Failed: too many orders, try again shortly";

/// Message shown when the submission outcome is unknown. Details stay in the log.
pub const OUTCOME_UNKNOWN_MESSAGE: &str =
    "Order Failed: could not confirm the order with the exchange, check open orders before resubmitting";

/// Shared state behind every route.
pub struct AppState<E: ExchangeClient> {
    /// Submits validated orders to the exchange.
    pub submitter: OrderSubmitter<E>,
    /// Local order-rate quota in front of the exchange.
    pub limiter: Arc<DefaultDirectRateLimiter>,
    /// Prometheus metrics; `None` disables `/metrics`.
    pub metrics: Option<Arc<MetricsRegistry>>,
    /// Readiness flag.
    pub health: Arc<HealthState>,
    /// Page title.
    pub title: Arc<str>,
}

impl<E: ExchangeClient> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            submitter: self.submitter.clone(),
            limiter: Arc::clone(&self.limiter),
            metrics: self.metrics.clone(),
            health: Arc::clone(&self.health),
            title: Arc::clone(&self.title),
        }
    }
}

impl<E: ExchangeClient> AppState<E> {
    /// Create state with an orders-per-minute quota.
    pub fn new(
        submitter: OrderSubmitter<E>,
        max_orders_per_minute: u32,
        metrics: Option<Arc<MetricsRegistry>>,
        health: Arc<HealthState>,
        title: &str,
    ) -> Self {
        let per_minute = NonZeroU32::new(max_orders_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            submitter,
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
            metrics,
            health,
            title: Arc::from(title),
        }
    }
}

/// Build the application router.
pub fn router<E: ExchangeClient>(state: AppState<E>) -> Router {
    Router::new()
        .route("/", get(show_form::<E>).post(submit_form::<E>))
        .route("/live", get(liveness))
        .route("/ready", get(readiness::<E>))
        .route("/metrics", get(metrics::<E>))
        .with_state(state)
}

/// Serve the router until the shutdown signal fires.
pub async fn serve<E: ExchangeClient>(
    state: AppState<E>,
    bind_address: &str,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    info!(address = %bind_address, "Order form listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .context("Order form server failed")?;

    Ok(())
}

async fn show_form<E: ExchangeClient>(State(state): State<AppState<E>>) -> Html<String> {
    Html(page::render(&state.title, None, &HashMap::new()))
}

async fn submit_form<E: ExchangeClient>(
    State(state): State<AppState<E>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let flash = process_order(&state, &fields).await;
    Html(page::render(&state.title, Some(&flash), &fields))
}

async fn readiness<E: ExchangeClient>(State(state): State<AppState<E>>) -> impl IntoResponse {
    readiness_response(&state.health)
}

async fn metrics<E: ExchangeClient>(State(state): State<AppState<E>>) -> Response {
    let Some(registry) = state.metrics.as_ref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match registry.render() {
        Ok(text) => text.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Validate, rate-check and submit one form, producing the flash to show.
pub async fn process_order<E: ExchangeClient>(
    state: &AppState<E>,
    fields: &HashMap<String, String>,
) -> Flash {
    let span = info_span!("order_form", request_id = %Uuid::new_v4());

    async move {
        let req = match validate(fields) {
            Ok(req) => req,
            Err(e) => {
                warn!(field = e.field(), error = %e, "Order form rejected");
                if let Some(m) = &state.metrics {
                    m.validation_failures.with_label_values(&[e.field()]).inc();
                }
                return Flash::danger(format!("Order Failed: {e}"));
            }
        };

        if state.limiter.check().is_err() {
            warn!("Local order quota exhausted");
            if let Some(m) = &state.metrics {
                m.rate_limited.inc();
            }
            return Flash::danger(RATE_LIMITED_MESSAGE);
        }

        let started = Instant::now();
        let submitter = state.submitter.clone();
        let result = tokio::spawn(async move { submitter.submit(req).await }.in_current_span())
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Submission task aborted");
                SubmissionResult::Failure {
                    kind: FailureKind::Transport,
                    message: format!("submission task failed: {e}"),
                }
            });

        if let Some(m) = &state.metrics {
            m.submit_latency_ms
                .observe(started.elapsed().as_secs_f64() * 1000.0);
            m.submissions
                .with_label_values(&[result.outcome_label()])
                .inc();
        }

        match result {
            SubmissionResult::Success {
                exchange_order_id, ..
            } => Flash::success(format!("Order Success: {exchange_order_id}")),
            SubmissionResult::Failure {
                kind: FailureKind::ExchangeRejected,
                message,
            } => Flash::danger(format!("Order Failed: {message}")),
            SubmissionResult::Failure {
                kind: FailureKind::Transport,
                ..
            } => Flash::danger(OUTCOME_UNKNOWN_MESSAGE),
        }
    }
    .instrument(span)
    .await
}

//! Health Checks - Liveness and Readiness Probes
//!
//! `/live` answers 200 while the process runs. `/ready` answers 200
//! until shutdown begins, then 503 so load balancers stop sending new
//! order forms while in-flight submissions finish.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Shared health state polled by readiness probes.
#[derive(Debug)]
pub struct HealthState {
    /// Cleared when graceful shutdown starts.
    accepting: AtomicBool,
}

impl HealthState {
    /// Create a new health state (ready by default).
    pub const fn new() -> Self {
        Self {
            accepting: AtomicBool::new(true),
        }
    }

    /// Check if the service is ready to accept orders.
    pub fn is_ready(&self) -> bool {
        self.accepting.load(Ordering::Relaxed)
    }

    /// Flip readiness off for the rest of the process lifetime.
    pub fn mark_shutting_down(&self) {
        self.accepting.store(false, Ordering::Relaxed);
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Liveness probe: always returns 200 if the process is running.
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness response for the given state.
pub fn readiness_response(state: &HealthState) -> (StatusCode, &'static str) {
    if state.is_ready() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_flips_on_shutdown() {
        let state = HealthState::new();
        assert_eq!(readiness_response(&state).0, StatusCode::OK);

        state.mark_shutting_down();
        assert!(!state.is_ready());
        assert_eq!(
            readiness_response(&state),
            (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
        );
    }
}

//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies, and hosts the inbound HTTP surface.
//!
//! Adapter categories:
//! - `api`: futures exchange REST client and request signing
//! - `logging`: tracing subscriber with the optional audit file
//! - `metrics`: Prometheus metrics registry
//! - `web`: order form, health probes, metrics endpoint

pub mod api;
pub mod logging;
pub mod metrics;
pub mod web;

//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use-case layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ExchangeClient`: futures order submission

pub mod exchange;

pub use exchange::{
    ExchangeClient, ExchangeError, OrderConfirmation, OrderParams, TimeInForce,
};

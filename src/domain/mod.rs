//! Domain layer - Order types and input validation.
//!
//! Pure logic only: no I/O, no async, no exchange knowledge beyond the
//! wire vocabulary of order sides and types. Everything here is safe
//! to call from any number of tasks at once.

pub mod error;
pub mod order;
pub mod validator;

// Re-export core types for convenience
pub use error::ValidationError;
pub use order::{OrderKind, OrderRequest, OrderSide};
pub use validator::validate;

//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain values with port interfaces.
//!
//! Use cases:
//! - `OrderSubmitter`: validated request → exchange → `SubmissionResult`

pub mod order_submitter;

pub use order_submitter::{FailureKind, OrderSubmitter, SubmissionResult};

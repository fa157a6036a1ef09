//! Shared types for the formbind error and logging facilities
//!
//! - **Correlation identifiers**: `RequestId`, `TraceId` tag every edit request
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestId, TraceId};

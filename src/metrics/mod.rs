//! Metrics collection and exposition.
//!
//! Exposition is served by the relay's own HTTP listener; see the server
//! module.

mod collector;

pub use collector::{MetricsCollector, ProbeOutcome};

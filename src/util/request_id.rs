//! Request ID generation for request tracing.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Counter for short request IDs.
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Request ID included in tracing spans for each served request.
#[derive(Clone, Debug)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new UUID-based request ID, globally unique.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a short counter-based request ID, unique within the process.
    /// Format: `req-{counter}` with the counter zero-padded to 16 hex digits.
    pub fn short() -> Self {
        let count = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("req-{:016x}", count))
    }

    /// Get the request ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

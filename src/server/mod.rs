//! HTTP surface of the relay.

mod service;

pub use service::{AppState, RelayServer};

//! linkrelay - a URL reachability relay for a portfolio page
//!
//! This crate provides a small health-check relay with support for:
//! - Bounded, redirect-following, header-only URL probes
//! - A JSON HTTP endpoint fronting the probe for browser callers
//! - Skills and project data loading for the portfolio page
//! - Prometheus metrics

pub mod config;
pub mod metrics;
pub mod portfolio;
pub mod probe;
pub mod server;
pub mod util;

pub use config::Config;

//! Metrics collector using prometheus-client.
//!
//! Provides metrics for probe outcomes, probe latency, and the relay's own
//! served requests.

use crate::probe::ProbeReport;
use prometheus_client::encoding::{EncodeLabelSet, EncodeLabelValue};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::time::Duration;

/// Labels for probe metrics.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ProbeLabels {
    pub outcome: ProbeOutcome,
}

/// Classified outcome of one probe.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum ProbeOutcome {
    Healthy,
    Unhealthy,
    TransportError,
    Rejected,
}

impl ProbeOutcome {
    /// Classify a completed report.
    pub fn from_report(report: &ProbeReport) -> Self {
        if report.is_healthy {
            Self::Healthy
        } else if report.error.is_some() {
            Self::TransportError
        } else {
            Self::Unhealthy
        }
    }
}

/// Labels for served-request metrics.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RequestLabels {
    pub path: String,
    pub status: String,
}

/// Collects and stores all metrics.
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsCollectorInner>,
}

struct MetricsCollectorInner {
    /// Probe outcomes counter.
    probes_total: Family<ProbeLabels, Counter>,
    /// Probe duration histogram (in seconds).
    probe_duration_seconds: Histogram,
    /// Requests served by the relay's own HTTP surface.
    requests_total: Family<RequestLabels, Counter>,
    /// The prometheus registry.
    registry: Registry,
}

impl MetricsCollector {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let probes_total = Family::<ProbeLabels, Counter>::default();
        // Buckets: 10ms up to ~10s, matching the probe's total timeout
        let probe_duration_seconds = Histogram::new(exponential_buckets(0.01, 2.5, 8));
        let requests_total = Family::<RequestLabels, Counter>::default();

        registry.register(
            "linkrelay_probes",
            "Total number of probes performed, by outcome",
            probes_total.clone(),
        );
        registry.register(
            "linkrelay_probe_duration_seconds",
            "Probe duration in seconds",
            probe_duration_seconds.clone(),
        );
        registry.register(
            "linkrelay_requests",
            "Total number of relay HTTP requests served",
            requests_total.clone(),
        );

        Self {
            inner: Arc::new(MetricsCollectorInner {
                probes_total,
                probe_duration_seconds,
                requests_total,
                registry,
            }),
        }
    }

    /// Get the prometheus registry for encoding.
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Record a completed probe.
    pub fn record_probe(&self, outcome: ProbeOutcome, duration: Duration) {
        self.inner
            .probes_total
            .get_or_create(&ProbeLabels { outcome })
            .inc();
        self.inner
            .probe_duration_seconds
            .observe(duration.as_secs_f64());
    }

    /// Record an input rejected before probing.
    pub fn record_rejected_probe(&self) {
        self.inner
            .probes_total
            .get_or_create(&ProbeLabels {
                outcome: ProbeOutcome::Rejected,
            })
            .inc();
    }

    /// Record a request served by the relay's HTTP surface.
    pub fn record_request(&self, path: &str, status: u16) {
        self.inner
            .requests_total
            .get_or_create(&RequestLabels {
                path: path.to_string(),
                status: status.to_string(),
            })
            .inc();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(collector: &MetricsCollector) -> String {
        let mut buffer = String::new();
        prometheus_client::encoding::text::encode(&mut buffer, collector.registry()).unwrap();
        buffer
    }

    #[test]
    fn test_record_probe_outcomes() {
        let collector = MetricsCollector::new();

        collector.record_probe(ProbeOutcome::Healthy, Duration::from_millis(20));
        collector.record_probe(ProbeOutcome::Unhealthy, Duration::from_millis(40));
        collector.record_probe(ProbeOutcome::TransportError, Duration::from_secs(10));
        collector.record_rejected_probe();

        let buffer = encode(&collector);
        assert!(buffer.contains("linkrelay_probes"));
        assert!(buffer.contains("linkrelay_probe_duration_seconds"));
    }

    #[test]
    fn test_record_request() {
        let collector = MetricsCollector::new();
        collector.record_request("/check-url", 200);
        collector.record_request("/check-url", 400);

        let buffer = encode(&collector);
        assert!(buffer.contains("linkrelay_requests"));
    }

    #[test]
    fn test_outcome_from_report() {
        let healthy = ProbeReport::from_status("https://a".into(), 200, String::new());
        assert_eq!(ProbeOutcome::from_report(&healthy), ProbeOutcome::Healthy);

        let unhealthy = ProbeReport::from_status("https://a".into(), 500, String::new());
        assert_eq!(
            ProbeOutcome::from_report(&unhealthy),
            ProbeOutcome::Unhealthy
        );

        let failed = ProbeReport::failed("https://a".into(), "timed out".into());
        assert_eq!(
            ProbeOutcome::from_report(&failed),
            ProbeOutcome::TransportError
        );
    }
}

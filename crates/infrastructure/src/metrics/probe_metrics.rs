use coredns_probe_application::ports::{MetricsExporter, MetricsSink};
use coredns_probe_domain::{ProbeOutcome, Target};
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};
use std::time::Duration;
use tracing::warn;

pub const RTT_METRIC_NAME: &str = "coredns_probe_rtt_milliseconds";
pub const RTT_METRIC_HELP: &str = "Histogram of round-trip time for DNS queries in milliseconds";

/// Upper bounds (ms) of the RTT histogram buckets; `+Inf` is implicit.
pub const RTT_BUCKETS_MS: [f64; 17] = [
    0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0,
];

const RTT_LABELS: [&str; 2] = ["endpoint", "status"];

/// Point-in-time view of one `(endpoint, status)` series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// Cumulative counts, one per entry of [`RTT_BUCKETS_MS`].
    pub cumulative: Vec<u64>,
    pub count: u64,
    pub sum_ms: f64,
}

/// RTT histogram labelled by endpoint and status, held in its own registry.
///
/// Series are created on first observation. Nothing is registered in the
/// process-wide default registry, so instances stay independent.
pub struct ProbeMetrics {
    registry: Registry,
    rtt: HistogramVec,
}

impl ProbeMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let rtt = HistogramVec::new(
            HistogramOpts::new(RTT_METRIC_NAME, RTT_METRIC_HELP).buckets(RTT_BUCKETS_MS.to_vec()),
            &RTT_LABELS,
        )?;
        registry.register(Box::new(rtt.clone()))?;

        Ok(Self { registry, rtt })
    }

    pub fn series_count(&self) -> usize {
        self.rtt_family().map_or(0, |family| family.get_metric().len())
    }

    pub fn snapshot_for(&self, endpoint: &str, outcome: ProbeOutcome) -> Option<HistogramSnapshot> {
        let family = self.rtt_family()?;
        let metric = family.get_metric().iter().find(|metric| {
            metric.get_label().iter().all(|pair| match pair.get_name() {
                "endpoint" => pair.get_value() == endpoint,
                "status" => pair.get_value() == outcome.as_label(),
                _ => true,
            })
        })?;

        let histogram = metric.get_histogram();
        Some(HistogramSnapshot {
            cumulative: histogram
                .get_bucket()
                .iter()
                .map(|bucket| bucket.get_cumulative_count())
                .collect(),
            count: histogram.get_sample_count(),
            sum_ms: histogram.get_sample_sum(),
        })
    }

    fn rtt_family(&self) -> Option<MetricFamily> {
        self.registry
            .gather()
            .into_iter()
            .find(|family| family.get_name() == RTT_METRIC_NAME)
    }
}

impl MetricsSink for ProbeMetrics {
    fn observe(&self, target: &Target, outcome: ProbeOutcome, elapsed: Duration) {
        let ms = elapsed.as_nanos() as f64 / 1e6;
        self.rtt
            .with_label_values(&[target.as_str(), outcome.as_label()])
            .observe(ms);
    }

    fn forget(&self, target: &Target) {
        for outcome in ProbeOutcome::ALL {
            // Absent series are fine; not every status has been seen.
            let _ = self
                .rtt
                .remove_label_values(&[target.as_str(), outcome.as_label()]);
        }
    }
}

impl MetricsExporter for ProbeMetrics {
    /// Prometheus text exposition format 0.0.4, series sorted by labels.
    fn render(&self) -> String {
        let mut buffer = Vec::with_capacity(4096);
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

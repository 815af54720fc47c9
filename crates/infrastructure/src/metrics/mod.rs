mod probe_metrics;

pub use probe_metrics::{
    HistogramSnapshot, ProbeMetrics, RTT_BUCKETS_MS, RTT_METRIC_HELP, RTT_METRIC_NAME,
};

mod metrics_exporter;
mod metrics_sink;
mod resolver_transport;
mod target_discovery;

pub use metrics_exporter::MetricsExporter;
pub use metrics_sink::MetricsSink;
pub use resolver_transport::ResolverTransport;
pub use target_discovery::TargetDiscovery;

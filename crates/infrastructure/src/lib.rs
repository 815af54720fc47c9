//! coredns-probe infrastructure: DNS wire transport, discovery adapters and
//! the Prometheus-text histogram registry.
pub mod discovery;
pub mod dns;
pub mod metrics;

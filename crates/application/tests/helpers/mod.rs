#![allow(dead_code)]

mod mocks;

pub use mocks::{Behavior, MockResolverTransport, MockTargetDiscovery, RecordingMetricsSink};

use coredns_probe_domain::Target;

pub fn target(ip: &str) -> Target {
    ip.parse().unwrap()
}

use coredns_probe_domain::{ProbeOutcome, Target};
use std::time::Duration;

/// Write-only destination for probe observations. Must not block.
pub trait MetricsSink: Send + Sync {
    fn observe(&self, target: &Target, outcome: ProbeOutcome, elapsed: Duration);

    /// Drop every series recorded for a target that is no longer probed.
    fn forget(&self, target: &Target);
}

use super::ProbeTargetUseCase;
use crate::services::TargetRegistry;
use coredns_probe_domain::ProbeOutcome;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tally of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub probed: usize,
    pub succeeded: usize,
    pub timed_out: usize,
    pub errored: usize,
    /// Probe tasks that panicked.
    pub aborted: usize,
}

impl TickSummary {
    fn add(&mut self, outcome: ProbeOutcome) {
        self.probed += 1;
        match outcome {
            ProbeOutcome::Success => self.succeeded += 1,
            ProbeOutcome::Timeout => self.timed_out += 1,
            ProbeOutcome::Error => self.errored += 1,
        }
    }
}

/// Use case: one scheduled round of probes, one concurrent task per target.
///
/// Returns only after every task of the round has finished, which is what
/// keeps consecutive ticks from overlapping.
pub struct RunProbeTickUseCase {
    registry: Arc<TargetRegistry>,
    probe: Arc<ProbeTargetUseCase>,
}

impl RunProbeTickUseCase {
    pub fn new(registry: Arc<TargetRegistry>, probe: Arc<ProbeTargetUseCase>) -> Self {
        Self { registry, probe }
    }

    pub async fn execute(&self) -> TickSummary {
        let targets = self.registry.snapshot();

        let tasks: Vec<_> = targets
            .iter()
            .cloned()
            .map(|entry| {
                let probe = Arc::clone(&self.probe);
                tokio::spawn(async move { probe.execute(&entry).await })
            })
            .collect();

        let mut summary = TickSummary::default();
        for result in join_all(tasks).await {
            match result {
                Ok(record) => summary.add(record.outcome),
                Err(e) => {
                    warn!(error = %e, "Probe task panicked");
                    summary.aborted += 1;
                }
            }
        }

        debug!(
            probed = summary.probed,
            succeeded = summary.succeeded,
            timed_out = summary.timed_out,
            errored = summary.errored,
            "Probe tick completed"
        );
        summary
    }
}

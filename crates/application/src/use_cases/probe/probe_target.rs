use crate::ports::{MetricsSink, ResolverTransport};
use crate::services::TargetEntry;
use coredns_probe_domain::{DomainError, ProbeOutcome, ProbeRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{error::Elapsed, Instant};
use tracing::{debug, trace};

/// Use case: probe one target once, bounded by the query deadline, and
/// record the result into its statistics and the metrics sink.
pub struct ProbeTargetUseCase {
    transport: Arc<dyn ResolverTransport>,
    sink: Arc<dyn MetricsSink>,
    query_timeout: Duration,
}

impl ProbeTargetUseCase {
    pub fn new(
        transport: Arc<dyn ResolverTransport>,
        sink: Arc<dyn MetricsSink>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            sink,
            query_timeout,
        }
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    pub async fn execute(&self, entry: &TargetEntry) -> ProbeRecord {
        let start = Instant::now();
        let result =
            tokio::time::timeout(self.query_timeout, self.transport.lookup(&entry.target)).await;
        let elapsed = start.elapsed();

        let outcome = Self::classify(&result);
        match &result {
            Ok(Err(e)) => {
                debug!(endpoint = %entry.target, error = %e, ?elapsed, "Probe failed");
            }
            Err(_) => {
                debug!(endpoint = %entry.target, ?elapsed, "Probe timed out");
            }
            Ok(Ok(())) => {
                trace!(endpoint = %entry.target, ?elapsed, "Probe succeeded");
            }
        }

        entry.stats.record_outcome(outcome, elapsed);
        self.sink.observe(&entry.target, outcome, elapsed);

        ProbeRecord::new(entry.target.clone(), outcome, elapsed)
    }

    /// Map a deadline-bounded lookup result onto the three-way taxonomy.
    pub fn classify(result: &Result<Result<(), DomainError>, Elapsed>) -> ProbeOutcome {
        match result {
            Ok(Ok(())) => ProbeOutcome::Success,
            Err(_) => ProbeOutcome::Timeout,
            Ok(Err(e)) if e.is_timeout() => ProbeOutcome::Timeout,
            Ok(Err(_)) => ProbeOutcome::Error,
        }
    }
}

use crate::ProbeOutcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Cumulative probe counters for one target.
///
/// Every field is independently atomic; readers may observe small skew
/// between fields but never `failed > total`: writers bump `total` before
/// `failed`, and [`EndpointStats::snapshot`] loads them in the opposite order.
// align(64): each target's record sits on its own cache line.
#[derive(Debug, Default)]
#[repr(align(64))]
pub struct EndpointStats {
    total: AtomicU64,
    failed: AtomicU64,
    success_rtt_sum_ns: AtomicU64,
}

impl EndpointStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_outcome(&self, outcome: ProbeOutcome, elapsed: Duration) {
        self.total.fetch_add(1, Ordering::AcqRel);

        if outcome.is_success() {
            let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
            self.success_rtt_sum_ns.fetch_add(nanos, Ordering::AcqRel);
        } else {
            self.failed.fetch_add(1, Ordering::AcqRel);
        }
    }

    pub fn snapshot(&self) -> EndpointSnapshot {
        let failed = self.failed.load(Ordering::Acquire);
        let success_rtt_sum_ns = self.success_rtt_sum_ns.load(Ordering::Acquire);
        let total = self.total.load(Ordering::Acquire);

        EndpointSnapshot {
            total,
            failed,
            success_rtt_sum: Duration::from_nanos(success_rtt_sum_ns),
        }
    }
}

/// Point-in-time read of an [`EndpointStats`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndpointSnapshot {
    pub total: u64,
    pub failed: u64,
    pub success_rtt_sum: Duration,
}

impl EndpointSnapshot {
    pub fn successes(&self) -> u64 {
        self.total.saturating_sub(self.failed)
    }

    pub fn has_queries(&self) -> bool {
        self.total > 0
    }

    /// Success percentage, `None` when nothing has been probed yet.
    pub fn success_rate_pct(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.successes() as f64 * 100.0 / self.total as f64)
    }

    /// Mean latency over successful probes, `None` without successes.
    pub fn avg_rtt(&self) -> Option<Duration> {
        let successes = self.successes();
        if successes == 0 {
            return None;
        }
        let avg_ns = self.success_rtt_sum.as_nanos() / u128::from(successes);
        Some(Duration::from_nanos(u64::try_from(avg_ns).unwrap_or(u64::MAX)))
    }

    pub fn avg_rtt_ms(&self) -> Option<f64> {
        self.avg_rtt().map(|d| d.as_nanos() as f64 / 1e6)
    }

    pub fn success_rtt_sum_ms(&self) -> f64 {
        self.success_rtt_sum.as_nanos() as f64 / 1e6
    }
}

use crate::services::TargetRegistry;
use coredns_probe_domain::{EndpointSnapshot, Target};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EndpointSummary {
    pub target: Target,
    pub snapshot: EndpointSnapshot,
}

impl fmt::Display for EndpointSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(pct) = self.snapshot.success_rate_pct() else {
            return write!(f, "  {} → no queries", self.target);
        };

        write!(
            f,
            "  {} → success {:.1}% ({}/{})  avgRTT ",
            self.target,
            pct,
            self.snapshot.successes(),
            self.snapshot.total
        )?;
        match self.snapshot.avg_rtt_ms() {
            Some(avg) => write!(f, "{:.2} ms", avg),
            None => f.write_str("n/a"),
        }
    }
}

/// One rendered block of the console summary.
#[derive(Debug, Clone, Default)]
pub struct SummaryReport {
    pub endpoints: Vec<EndpointSummary>,
}

impl SummaryReport {
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", endpoint)?;
        }
        Ok(())
    }
}

/// Use case: read every target's statistics without touching them.
pub struct BuildSummaryUseCase {
    registry: Arc<TargetRegistry>,
}

impl BuildSummaryUseCase {
    pub fn new(registry: Arc<TargetRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(&self) -> SummaryReport {
        let endpoints = self
            .registry
            .snapshot()
            .iter()
            .map(|entry| EndpointSummary {
                target: entry.target.clone(),
                snapshot: entry.stats.snapshot(),
            })
            .collect();

        SummaryReport { endpoints }
    }
}

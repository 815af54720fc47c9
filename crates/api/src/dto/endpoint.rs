use coredns_probe_application::use_cases::EndpointSummary;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub endpoint: String,
    pub total: u64,
    pub failed: u64,
    pub successes: u64,
    /// Percentage, absent until the first probe.
    pub success_rate: Option<f64>,
    /// Absent until the first successful probe.
    pub avg_rtt_ms: Option<f64>,
}

impl From<&EndpointSummary> for EndpointResponse {
    fn from(summary: &EndpointSummary) -> Self {
        let snap = &summary.snapshot;
        Self {
            endpoint: summary.target.to_string(),
            total: snap.total,
            failed: snap.failed,
            successes: snap.successes(),
            success_rate: snap.success_rate_pct(),
            avg_rtt_ms: snap.avg_rtt_ms(),
        }
    }
}

use coredns_probe_application::ports::MetricsExporter;
use coredns_probe_application::use_cases::BuildSummaryUseCase;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<dyn MetricsExporter>,
    pub summary: Arc<BuildSummaryUseCase>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(metrics: Arc<dyn MetricsExporter>, summary: Arc<BuildSummaryUseCase>) -> Self {
        Self {
            metrics,
            summary,
            started_at: Instant::now(),
        }
    }
}

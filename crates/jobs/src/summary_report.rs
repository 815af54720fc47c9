use chrono::{SecondsFormat, Utc};
use coredns_probe_application::use_cases::BuildSummaryUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Prints the per-endpoint console summary on its own interval.
pub struct SummaryReportJob {
    summary: Arc<BuildSummaryUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl SummaryReportJob {
    pub fn new(summary: Arc<BuildSummaryUseCase>, interval: Duration) -> Self {
        Self {
            summary,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Header line plus one line per endpoint.
    pub fn render_block(&self) -> String {
        let report = self.summary.execute();
        let header = format!(
            "── CoreDNS probe summary @ {} ({} endpoints) ──",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            report.endpoints.len()
        );
        if report.is_empty() {
            header
        } else {
            format!("{}\n{}", header, report)
        }
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval.as_secs(), "Starting summary reporter");

        // First report after one full interval, not at startup.
        let Some(first_report) = Instant::now().checked_add(self.interval) else {
            warn!(interval = ?self.interval, "Summary interval out of range, reporter idle");
            self.shutdown.cancelled().await;
            return;
        };
        let mut interval = tokio::time::interval_at(first_report, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("SummaryReportJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    println!("{}", self.render_block());
                }
            }
        }
    }
}

use coredns_probe_application::use_cases::RefreshTargetsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodic re-discovery. A failed round keeps the current target set.
pub struct TargetRefreshJob {
    refresh: Arc<RefreshTargetsUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl TargetRefreshJob {
    pub fn new(refresh: Arc<RefreshTargetsUseCase>, interval: Duration) -> Self {
        Self {
            refresh,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval.as_secs(), "Starting target refresh job");

        let Some(first_refresh) = Instant::now().checked_add(self.interval) else {
            warn!(interval = ?self.interval, "Refresh interval out of range, refresh idle");
            self.shutdown.cancelled().await;
            return;
        };
        let mut interval = tokio::time::interval_at(first_refresh, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("TargetRefreshJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.refresh.execute().await {
                        Ok(change) if change.is_unchanged() => {
                            debug!(targets = change.retained, "Target set unchanged");
                        }
                        Ok(change) => {
                            info!(
                                added = ?change.added.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
                                removed = ?change.removed.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
                                "Target set refreshed"
                            );
                        }
                        Err(e) => {
                            warn!(error = %e, "Target refresh failed, keeping current targets");
                        }
                    }
                }
            }
        }
    }
}

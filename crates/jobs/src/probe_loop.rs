use coredns_probe_application::use_cases::RunProbeTickUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drives one probe tick per interval. A tick that overruns the interval
/// delays the next one; missed ticks are skipped, never queued.
pub struct ProbeLoopJob {
    tick: Arc<RunProbeTickUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ProbeLoopJob {
    pub fn new(tick: Arc<RunProbeTickUseCase>, interval: Duration) -> Self {
        Self {
            tick,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_ms = self.interval.as_millis() as u64, "Starting probe loop");

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!(ticks, "ProbeLoopJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    // Probes already spawned are left to finish on their own deadline.
                    tokio::select! {
                        _ = self.shutdown.cancelled() => {
                            info!(ticks, "ProbeLoopJob: shutting down mid-tick");
                            break;
                        }
                        summary = self.tick.execute() => {
                            ticks += 1;
                            debug!(
                                tick = ticks,
                                probed = summary.probed,
                                failed = summary.timed_out + summary.errored + summary.aborted,
                                "Probe tick finished"
                            );
                        }
                    }
                }
            }
        }
    }
}

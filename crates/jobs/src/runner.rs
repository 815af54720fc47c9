use crate::{ProbeLoopJob, SummaryReportJob, TargetRefreshJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(ProbeLoopJob);
impl_spawnable_job!(SummaryReportJob);
impl_spawnable_job!(TargetRefreshJob);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
    handles: &mut Vec<JoinHandle<()>>,
) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        handles.push(Arc::new(job).start_job());
    }
}

pub struct JobRunner {
    probe_loop: Option<ProbeLoopJob>,
    summary_report: Option<SummaryReportJob>,
    target_refresh: Option<TargetRefreshJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            probe_loop: None,
            summary_report: None,
            target_refresh: None,
            shutdown: None,
        }
    }

    pub fn with_probe_loop(mut self, job: ProbeLoopJob) -> Self {
        self.probe_loop = Some(job);
        self
    }

    pub fn with_summary_report(mut self, job: SummaryReportJob) -> Self {
        self.summary_report = Some(job);
        self
    }

    pub fn with_target_refresh(mut self, job: TargetRefreshJob) -> Self {
        self.target_refresh = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawn every configured job. The handles finish once the shutdown
    /// token is cancelled.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::with_capacity(3);
        spawn_job(self.probe_loop, &self.shutdown, &mut handles);
        spawn_job(self.summary_report, &self.shutdown, &mut handles);
        spawn_job(self.target_refresh, &self.shutdown, &mut handles);

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

pub mod probe_loop;
pub mod runner;
pub mod summary_report;
pub mod target_refresh;

pub use probe_loop::ProbeLoopJob;
pub use runner::JobRunner;
pub use summary_report::SummaryReportJob;
pub use target_refresh::TargetRefreshJob;

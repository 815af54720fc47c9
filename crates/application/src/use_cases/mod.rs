pub mod discovery;
pub mod probe;
pub mod summary;

pub use discovery::{DiscoverTargetsUseCase, RefreshTargetsUseCase};
pub use probe::{ProbeTargetUseCase, RunProbeTickUseCase, TickSummary};
pub use summary::{BuildSummaryUseCase, EndpointSummary, SummaryReport};

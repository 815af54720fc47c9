pub mod probe_target;
pub mod run_probe_tick;

pub use probe_target::ProbeTargetUseCase;
pub use run_probe_tick::{RunProbeTickUseCase, TickSummary};

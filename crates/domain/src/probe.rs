use crate::Target;
use std::fmt;
use std::time::Duration;

/// Terminal classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProbeOutcome {
    /// The lookup completed before the deadline.
    Success,
    /// The deadline elapsed before the lookup completed.
    Timeout,
    /// Any other failure: refused, unreachable, malformed or failed answer.
    Error,
}

impl ProbeOutcome {
    pub const ALL: [ProbeOutcome; 3] = [Self::Success, Self::Timeout, Self::Error];

    /// Value of the `status` metric label.
    pub fn as_label(&self) -> &'static str {
        match self {
            ProbeOutcome::Success => "success",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::Error => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Result of one probe attempt. Not retained after it has been recorded.
#[derive(Debug, Clone)]
pub struct ProbeRecord {
    pub target: Target,
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

impl ProbeRecord {
    pub fn new(target: Target, outcome: ProbeOutcome, elapsed: Duration) -> Self {
        Self {
            target,
            outcome,
            elapsed,
        }
    }
}

// Shared filtering types
use serde::Serialize;

/// Verdict for one record against a compiled filter plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Passed the quality gate and no field filter fired
    Pass,
    /// Quality gate failed or a field filter fired
    Reject,
}

impl FilterDecision {
    pub fn is_pass(self) -> bool {
        matches!(self, FilterDecision::Pass)
    }
}

/// Counts accumulated over one partition run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOutcome {
    /// Records read from the input stream
    pub total: u64,
    /// Records written to the primary sink
    pub passed: u64,
    /// Records rejected; always `total - passed`
    pub filtered: u64,
    pub elapsed_ms: u64,
}

//! What a completed (or partially completed) driver run returns.

use reagent_types::ParseOutcome;

/// Why a [`crate::driver::Driver::run`] call stopped producing turns.
///
/// Unlike [`reagent_types::TerminationReason`], this is the caller-facing
/// shape: it never reveals that a run was cut off as a *failure* — hitting
/// the iteration limit is still a successful call that returns whatever the
/// model last said, per §4.3's treatment of the limit as a partial success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The model produced a final answer and the session ended normally.
    Stop,
    /// The iteration limit was reached before a final answer appeared.
    Length,
    /// The token budget was exhausted even after compression.
    ContextExhausted,
}

/// The result of a completed or bounded-out driver run.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOutcome {
    /// The last parsed model turn produced before the run stopped.
    pub outcome: ParseOutcome,
    /// How many reason-act-observe turns elapsed.
    pub iteration: u32,
    /// Why the run stopped.
    pub finish_reason: FinishReason,
}

//! Two-stage, signal-driven strategy and focus selection.
//!
//! Stage 1 ranks every strategy in the methodology over global-scope
//! signals, with phase adjustment. Stage 2, for node-bound winners, ranks
//! candidate nodes over the winner's node-scope weights. Both stages emit
//! complete `ScoredCandidate` audit records on the one scoring path the
//! selector ever takes.

mod decomposition;
mod scorer;
mod selector;

#[cfg(test)]
mod tests;

pub use decomposition::{CandidateScope, ScoredCandidate};
pub use scorer::{score, SignalContribution};
pub use selector::{
    SelectionEngine, TurnRequest, TurnSelection, GENERIC_TOPIC_FOCUS, SUMMARY_FOCUS,
};

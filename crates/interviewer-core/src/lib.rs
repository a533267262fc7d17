//! Adaptive strategy and focus selection for multi-turn interviews.
//!
//! Every turn, the engine ranks the methodology's strategies against a flat
//! signal snapshot, rescales by interview phase, and, for node-bound
//! winners, ranks candidate graph nodes to resolve the question's focus.
//! Methodologies are declarative data; the engine owns no cross-turn state.

pub mod config;
pub mod error;
pub mod methodology;
pub mod selection;
pub mod signals;
pub mod trackers;

pub use error::{ConfigurationError, NoEligibleStrategyError};
pub use methodology::{
    FocusMode, InterviewPhase, Methodology, NodeBinding, PhaseAdjustment, PhaseTable,
    StrategyConfig,
};
pub use selection::{
    CandidateScope, ScoredCandidate, SelectionEngine, SignalContribution, TurnRequest,
    TurnSelection,
};
pub use signals::{NodeCandidate, SignalSnapshot, SignalValue};

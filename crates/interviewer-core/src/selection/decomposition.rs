use super::scorer::SignalContribution;
use serde::{Deserialize, Serialize};

/// Which stage produced a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateScope {
    Strategy,
    Node,
}

/// Full audit record for one candidate at one stage. Computing these never
/// influences selection; the selector produces them on the single scoring
/// path it always takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub scope: CandidateScope,
    /// Strategy name or node id, depending on scope.
    pub identifier: String,
    pub signal_contributions: Vec<SignalContribution>,
    pub base_score: f64,
    /// Always 1.0 at node scope; phase adjustment applies to Stage 1 only.
    pub phase_multiplier: f64,
    /// Always 0.0 at node scope.
    pub phase_bonus: f64,
    /// `base_score * phase_multiplier + phase_bonus`.
    pub final_score: f64,
    /// 1-based; 1 is the stage winner. Ties break by original candidate
    /// order, so ranks are a strict total order.
    pub rank: usize,
    pub selected: bool,
}

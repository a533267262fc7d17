use super::decomposition::{CandidateScope, ScoredCandidate};
use super::scorer;
use crate::error::{ConfigurationError, NoEligibleStrategyError};
use crate::methodology::{InterviewPhase, Methodology, NodeBinding, PhaseAdjustment, StrategyConfig};
use crate::signals::{partition_weights, NodeCandidate, SignalSnapshot};
use tracing::debug;

/// Sentinel focus meaning "the discussion so far"; downstream question
/// generation expands it into an actual summary.
pub const SUMMARY_FOCUS: &str = "the discussion so far";

/// Placeholder focus used when no node, recent label, or topic is available.
pub const GENERIC_TOPIC_FOCUS: &str = "the overall topic";

/// Everything one turn's evaluation depends on. The engine reads this and
/// its own methodology only; there is no other state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnRequest {
    /// 1-based turn index, used to derive the phase unless overridden.
    pub turn: u32,
    pub phase_override: Option<InterviewPhase>,
    pub global_signals: SignalSnapshot,
    /// Focus candidates for node-bound strategies, in caller order.
    pub node_candidates: Vec<NodeCandidate>,
    /// Recently discussed node labels, most recent first.
    pub recent_nodes: Vec<String>,
    /// The interview's overarching subject label.
    pub topic: String,
}

impl TurnRequest {
    pub fn for_turn(turn: u32, global_signals: SignalSnapshot) -> Self {
        Self {
            turn,
            global_signals,
            ..Self::default()
        }
    }
}

/// Outcome of one turn's selection, with the complete audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSelection {
    pub strategy_name: String,
    /// Propagated verbatim for downstream prompt construction.
    pub strategy_description: String,
    pub focus: String,
    /// The only termination contract downstream logic may rely on.
    pub generates_closing_question: bool,
    pub phase: InterviewPhase,
    /// Stage-1 strategy records in rank order, then Stage-2 node records in
    /// rank order.
    pub decomposition: Vec<ScoredCandidate>,
}

struct StageEntry {
    index: usize,
    eligible: bool,
    base_score: f64,
    contributions: Vec<scorer::SignalContribution>,
    adjustment: PhaseAdjustment,
    final_score: f64,
}

/// Two-stage strategy and focus selector over a validated methodology.
/// Stateless across turns; every evaluation is a pure function of the
/// methodology and the request.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    methodology: Methodology,
}

impl SelectionEngine {
    pub fn new(methodology: Methodology) -> Result<Self, ConfigurationError> {
        methodology.validate()?;
        Ok(Self { methodology })
    }

    pub fn methodology(&self) -> &Methodology {
        &self.methodology
    }

    /// Select a strategy and resolve its focus for one turn.
    pub fn select(&self, request: &TurnRequest) -> Result<TurnSelection, NoEligibleStrategyError> {
        let phase = request
            .phase_override
            .unwrap_or_else(|| self.methodology.phase_for_turn(request.turn));

        let entries = self.rank_strategies(phase, request);
        let winner_entry = entries
            .first()
            .filter(|entry| entry.eligible)
            .ok_or_else(|| NoEligibleStrategyError {
                node_bound_strategies: self.methodology.strategies.len(),
            })?;
        let winner = &self.methodology.strategies[winner_entry.index];
        debug!(
            strategy = winner.name.as_str(),
            phase = phase.label(),
            score = winner_entry.final_score,
            "stage 1 selected strategy"
        );

        let mut decomposition = candidate_records(
            CandidateScope::Strategy,
            &entries,
            |index| self.methodology.strategies[index].name.clone(),
        );

        let focus_node = if winner.node_binding == NodeBinding::Required {
            let node_entries = rank_nodes(winner, &request.node_candidates);
            let top = node_entries
                .first()
                .map(|entry| request.node_candidates[entry.index].id.clone());
            decomposition.extend(candidate_records(
                CandidateScope::Node,
                &node_entries,
                |index| request.node_candidates[index].id.clone(),
            ));
            top
        } else {
            None
        };

        let focus = match focus_node {
            Some(node_id) => {
                debug!(node = node_id.as_str(), "stage 2 selected focus node");
                node_id
            }
            None => resolve_unbound_focus(winner, request),
        };

        Ok(TurnSelection {
            strategy_name: winner.name.clone(),
            strategy_description: winner.description.clone(),
            focus,
            generates_closing_question: winner.generates_closing_question,
            phase,
            decomposition,
        })
    }

    /// Score every catalog entry over global-scope signals and order by
    /// eligibility first, then final score, then catalog position. A
    /// node-binding strategy with no candidates to bind is demoted below
    /// every eligible entry rather than silently picked without a focus.
    fn rank_strategies(&self, phase: InterviewPhase, request: &TurnRequest) -> Vec<StageEntry> {
        let has_candidates = !request.node_candidates.is_empty();
        let mut entries: Vec<StageEntry> = self
            .methodology
            .strategies
            .iter()
            .enumerate()
            .map(|(index, strategy)| {
                let scoped = partition_weights(&strategy.signal_weights);
                let (base_score, contributions) =
                    scorer::score(scoped.global, &request.global_signals);
                let adjustment = self.methodology.phases.adjustment(phase, &strategy.name);
                let final_score = base_score * adjustment.multiplier + adjustment.bonus;
                let eligible = strategy.node_binding == NodeBinding::None || has_candidates;
                if !eligible {
                    debug!(
                        strategy = strategy.name.as_str(),
                        "demoting node-bound strategy: no candidate nodes this turn"
                    );
                }
                StageEntry {
                    index,
                    eligible,
                    base_score,
                    contributions,
                    adjustment,
                    final_score,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.eligible
                .cmp(&a.eligible)
                .then_with(|| b.final_score.total_cmp(&a.final_score))
                .then_with(|| a.index.cmp(&b.index))
        });
        entries
    }
}

/// Score candidate nodes with the winning strategy's node-scope weights.
/// Phase adjustment never applies at node scope.
fn rank_nodes(strategy: &StrategyConfig, candidates: &[NodeCandidate]) -> Vec<StageEntry> {
    let scoped = partition_weights(&strategy.signal_weights);
    let mut entries: Vec<StageEntry> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let (base_score, contributions) =
                scorer::score(scoped.node.iter().copied(), &candidate.signals);
            StageEntry {
                index,
                eligible: true,
                base_score,
                contributions,
                adjustment: PhaseAdjustment::default(),
                final_score: base_score,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.final_score
            .total_cmp(&a.final_score)
            .then_with(|| a.index.cmp(&b.index))
    });
    entries
}

fn candidate_records(
    scope: CandidateScope,
    entries: &[StageEntry],
    identifier: impl Fn(usize) -> String,
) -> Vec<ScoredCandidate> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| ScoredCandidate {
            scope,
            identifier: identifier(entry.index),
            signal_contributions: entry.contributions.clone(),
            base_score: entry.base_score,
            phase_multiplier: entry.adjustment.multiplier,
            phase_bonus: entry.adjustment.bonus,
            final_score: entry.final_score,
            rank: position + 1,
            selected: position == 0,
        })
        .collect()
}

/// Resolve the focus string for strategies without a Stage-2 winner.
fn resolve_unbound_focus(strategy: &StrategyConfig, request: &TurnRequest) -> String {
    use crate::methodology::FocusMode;

    match strategy.focus_mode {
        FocusMode::RecentNode => request
            .recent_nodes
            .first()
            .cloned()
            .unwrap_or_else(|| GENERIC_TOPIC_FOCUS.to_string()),
        FocusMode::Summary => SUMMARY_FOCUS.to_string(),
        FocusMode::Topic => {
            if request.topic.trim().is_empty() {
                GENERIC_TOPIC_FOCUS.to_string()
            } else {
                request.topic.clone()
            }
        }
    }
}

//! Bounded cross-turn history trackers.
//!
//! The selection engine is pure: it never reads or writes state between
//! turns. Repetition and exhaustion history live here instead, owned by the
//! calling pipeline, and flow back into the engine as ordinary signals.

use crate::signals::{NodeCandidate, SignalSnapshot};
use std::collections::BTreeMap;

/// Signal key carrying the normalized consecutive-same-strategy count.
pub const STRATEGY_REPETITION_SIGNAL: &str = "temporal.strategy_repetition_count";

/// Per-node signal key for decayed novelty.
pub const NODE_FRESHNESS_SIGNAL: &str = "graph.node.freshness";

/// Per-node signal key for accumulated wear, `1.0 - freshness`.
pub const NODE_EXHAUSTION_SIGNAL: &str = "graph.node.exhaustion_score";

/// Counts how many consecutive turns selected the same strategy and exposes
/// the count as a `[0, 1]` signal so methodologies can penalize fixation.
#[derive(Debug, Clone)]
pub struct StrategyRepetitionTracker {
    last_strategy: Option<String>,
    consecutive: u32,
    /// Count at which the signal saturates at 1.0.
    saturation: u32,
}

impl StrategyRepetitionTracker {
    pub fn new(saturation: u32) -> Self {
        Self {
            last_strategy: None,
            consecutive: 0,
            saturation: saturation.max(1),
        }
    }

    /// Record the strategy chosen this turn.
    pub fn record(&mut self, strategy_name: &str) {
        if self.last_strategy.as_deref() == Some(strategy_name) {
            self.consecutive += 1;
        } else {
            self.last_strategy = Some(strategy_name.to_string());
            self.consecutive = 1;
        }
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    /// Normalized repetition pressure; 0.0 before any turn, 1.0 once the
    /// same strategy has run `saturation` turns in a row.
    pub fn repetition_signal(&self) -> f64 {
        (self.consecutive as f64 / self.saturation as f64).min(1.0)
    }

    /// Inject the repetition signal into the next turn's global snapshot.
    pub fn annotate(&self, snapshot: &mut SignalSnapshot) {
        snapshot.set(STRATEGY_REPETITION_SIGNAL, self.repetition_signal());
    }
}

impl Default for StrategyRepetitionTracker {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Tracks how worn each node is: freshness starts at 1.0 when a node first
/// appears and decays multiplicatively every time it is revisited. The map
/// is bounded; when full, the most exhausted node is dropped (its signals
/// then read as fresh again, which is the safe direction for a focus the
/// interview abandoned long ago).
#[derive(Debug, Clone)]
pub struct NodeFreshnessTracker {
    freshness: BTreeMap<String, f64>,
    capacity: usize,
    decay: f64,
}

impl NodeFreshnessTracker {
    pub fn new(capacity: usize, decay: f64) -> Self {
        Self {
            freshness: BTreeMap::new(),
            capacity: capacity.max(1),
            decay: decay.clamp(0.0, 1.0),
        }
    }

    /// Record that a node was the turn's focus. The first visit keeps full
    /// freshness; each revisit decays it.
    pub fn observe(&mut self, node_id: &str) {
        if let Some(value) = self.freshness.get_mut(node_id) {
            *value *= self.decay;
        } else {
            self.freshness.insert(node_id.to_string(), 1.0);
        }

        while self.freshness.len() > self.capacity {
            let most_exhausted = self
                .freshness
                .iter()
                .min_by(|a, b| a.1.total_cmp(b.1))
                .map(|(id, _)| id.clone());
            match most_exhausted {
                Some(id) => {
                    self.freshness.remove(&id);
                }
                None => break,
            }
        }
    }

    /// Freshness for a node; unseen nodes are fully fresh.
    pub fn freshness(&self, node_id: &str) -> f64 {
        self.freshness.get(node_id).copied().unwrap_or(1.0)
    }

    pub fn exhaustion(&self, node_id: &str) -> f64 {
        1.0 - self.freshness(node_id)
    }

    pub fn tracked_nodes(&self) -> usize {
        self.freshness.len()
    }

    /// Inject freshness and exhaustion into each candidate's snapshot.
    pub fn annotate(&self, candidates: &mut [NodeCandidate]) {
        for candidate in candidates {
            candidate
                .signals
                .set(NODE_FRESHNESS_SIGNAL, self.freshness(&candidate.id));
            candidate
                .signals
                .set(NODE_EXHAUSTION_SIGNAL, self.exhaustion(&candidate.id));
        }
    }
}

impl Default for NodeFreshnessTracker {
    fn default() -> Self {
        Self::new(64, 0.6)
    }
}

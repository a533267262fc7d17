//! Signal vocabulary shared between the engine and its collaborators.
//!
//! Signals arrive as a flat dotted-namespace mapping rebuilt fresh each turn.
//! A key either carries a continuous value in `[0, 1]` or marks a discretized
//! bucket (`<signal>.<bucket>`) as having fired. Missing keys always read as
//! `0.0` / not fired, so partially computed snapshots degrade instead of
//! erroring.

pub mod buckets;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Namespace prefix marking a signal as node-scoped (Stage 2 only).
pub const NODE_SCOPE_PREFIX: &str = "graph.node.";

/// One observation: either a continuous value or a bucket-fired marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Continuous(f64),
    Fired(bool),
}

impl SignalValue {
    /// Numeric value the scorer consumes. Buckets never earn partial credit:
    /// a fired bucket counts as exactly `1.0`.
    pub fn effective(self) -> f64 {
        match self {
            SignalValue::Continuous(value) => value,
            SignalValue::Fired(true) => 1.0,
            SignalValue::Fired(false) => 0.0,
        }
    }
}

/// Immutable flat signal mapping for one evaluation scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSnapshot {
    values: BTreeMap<String, SignalValue>,
}

impl SignalSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a continuous signal value.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values
            .insert(key.into(), SignalValue::Continuous(value));
    }

    /// Record that a discretized bucket fired this turn.
    pub fn mark_fired(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), SignalValue::Fired(true));
    }

    /// Effective value for a key; absent keys read as `0.0`.
    pub fn get(&self, key: &str) -> f64 {
        self.values
            .get(key)
            .map(|value| value.effective())
            .unwrap_or(0.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SignalValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl FromIterator<(String, SignalValue)> for SignalSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, SignalValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// True when a weight key addresses per-node state rather than the global
/// conversation scope.
pub fn is_node_scoped(key: &str) -> bool {
    key.starts_with(NODE_SCOPE_PREFIX)
}

/// A strategy's weights split by evaluation scope, preserving the catalog's
/// key ordering within each half.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedWeights<'a> {
    pub global: Vec<(&'a str, f64)>,
    pub node: Vec<(&'a str, f64)>,
}

/// Partition `signal_weights` into global-scope keys (Stage 1) and
/// node-scope keys (Stage 2).
pub fn partition_weights(weights: &BTreeMap<String, f64>) -> ScopedWeights<'_> {
    let mut global = Vec::new();
    let mut node = Vec::new();
    for (key, weight) in weights {
        if is_node_scoped(key) {
            node.push((key.as_str(), *weight));
        } else {
            global.push((key.as_str(), *weight));
        }
    }
    ScopedWeights { global, node }
}

/// A focus candidate: one graph node and its per-node signal snapshot.
/// Candidate order is caller-supplied and breaks Stage-2 score ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCandidate {
    pub id: String,
    #[serde(default)]
    pub signals: SignalSnapshot,
}

impl NodeCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            signals: SignalSnapshot::new(),
        }
    }
}

//! Declarative interviewing methodologies: the strategy catalog and its
//! phase table. New methodologies are plain data; nothing in the engine
//! switches on a strategy or signal name.

mod builtin;
mod loader;
mod phase;

pub use phase::{InterviewPhase, PhaseAdjustment, PhaseTable};

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// How a strategy's focus string is resolved when no Stage-2 node wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    #[default]
    RecentNode,
    Summary,
    Topic,
}

/// Whether strategy selection must be followed by node-level focus ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeBinding {
    #[default]
    None,
    Required,
}

/// One interviewing tactic and the weighted-signal profile that determines
/// when it should be chosen. Weight keys are an open vocabulary; sign and
/// magnitude are both meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    /// Human-readable intent, propagated verbatim to downstream prompt
    /// construction. The engine never interprets it.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub signal_weights: BTreeMap<String, f64>,
    /// Marks the strategy as interview-terminating. Downstream continuation
    /// logic keys off this flag, never off the strategy's name.
    #[serde(default)]
    pub generates_closing_question: bool,
    #[serde(default)]
    pub focus_mode: FocusMode,
    #[serde(default)]
    pub node_binding: NodeBinding,
}

impl StrategyConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            signal_weights: BTreeMap::new(),
            generates_closing_question: false,
            focus_mode: FocusMode::default(),
            node_binding: NodeBinding::default(),
        }
    }

    pub fn with_weight(mut self, signal: impl Into<String>, weight: f64) -> Self {
        self.signal_weights.insert(signal.into(), weight);
        self
    }
}

/// An ordered strategy catalog plus phase boundaries and adjustments.
/// Catalog order is meaningful: it breaks Stage-1 score ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    pub name: String,
    pub strategies: Vec<StrategyConfig>,
    #[serde(default)]
    pub phases: PhaseTable,
}

impl Methodology {
    /// Reject catalogs the engine cannot score deterministically. Each
    /// rejection names the offending strategy index and field; the caller
    /// aborts the load rather than falling back to a default.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.strategies.is_empty() {
            return Err(ConfigurationError::EmptyCatalog {
                methodology: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for (index, strategy) in self.strategies.iter().enumerate() {
            if strategy.name.trim().is_empty() {
                return Err(ConfigurationError::EmptyStrategyName { index });
            }
            if !seen.insert(strategy.name.as_str()) {
                return Err(ConfigurationError::DuplicateStrategyName {
                    index,
                    name: strategy.name.clone(),
                });
            }
            for (signal, weight) in &strategy.signal_weights {
                if !weight.is_finite() {
                    return Err(ConfigurationError::NonFiniteWeight {
                        index,
                        name: strategy.name.clone(),
                        signal: signal.clone(),
                    });
                }
            }
        }

        if self.phases.mid_starts_at_turn > self.phases.late_starts_at_turn {
            return Err(ConfigurationError::PhaseBoundaryOrder {
                mid_starts_at_turn: self.phases.mid_starts_at_turn,
                late_starts_at_turn: self.phases.late_starts_at_turn,
            });
        }
        for phase in InterviewPhase::ordered() {
            for (name, adjustment) in self.phases.adjustments_for(phase) {
                if !seen.contains(name.as_str()) {
                    return Err(ConfigurationError::UnknownPhaseStrategy {
                        phase,
                        name: name.clone(),
                    });
                }
                if !adjustment.multiplier.is_finite() {
                    return Err(ConfigurationError::NonFinitePhaseAdjustment {
                        phase,
                        name: name.clone(),
                        field: "multiplier",
                    });
                }
                if !adjustment.bonus.is_finite() {
                    return Err(ConfigurationError::NonFinitePhaseAdjustment {
                        phase,
                        name: name.clone(),
                        field: "bonus",
                    });
                }
            }
        }

        Ok(())
    }

    pub fn phase_for_turn(&self, turn: u32) -> InterviewPhase {
        self.phases.phase_for_turn(turn)
    }

    pub fn strategy(&self, name: &str) -> Option<&StrategyConfig> {
        self.strategies.iter().find(|entry| entry.name == name)
    }
}

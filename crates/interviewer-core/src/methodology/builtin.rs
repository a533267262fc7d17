//! Built-in laddering methodology used by the CLI demo and as a worked
//! example of the declarative format. Production methodologies load from
//! JSON; nothing below is special-cased by the engine.

use super::{FocusMode, Methodology, NodeBinding, PhaseAdjustment, PhaseTable, StrategyConfig};
use std::collections::BTreeMap;

impl Methodology {
    pub fn standard() -> Self {
        let methodology = Methodology {
            name: "standard-laddering".to_string(),
            strategies: standard_strategies(),
            phases: standard_phase_table(),
        };
        debug_assert!(methodology.validate().is_ok());
        methodology
    }
}

fn standard_strategies() -> Vec<StrategyConfig> {
    vec![
        StrategyConfig {
            name: "broaden".to_string(),
            description: "Open new ground by asking about an aspect of the topic \
                          the respondent has not raised yet."
                .to_string(),
            signal_weights: weights(&[
                ("llm.engagement", 0.5),
                ("graph.saturation", 0.7),
                ("temporal.strategy_repetition_count", -0.4),
            ]),
            generates_closing_question: false,
            focus_mode: FocusMode::Topic,
            node_binding: NodeBinding::None,
        },
        StrategyConfig {
            name: "deepen".to_string(),
            description: "Ladder down into a promising concept, asking why it matters \
                          to the respondent."
                .to_string(),
            signal_weights: weights(&[
                ("llm.specificity.low", 0.6),
                ("llm.valence", 0.3),
                ("graph.node.freshness", 0.7),
                ("graph.node.exhaustion_score", -1.0),
                ("graph.node.degree", 0.2),
            ]),
            generates_closing_question: false,
            focus_mode: FocusMode::RecentNode,
            node_binding: NodeBinding::Required,
        },
        StrategyConfig {
            name: "clarify".to_string(),
            description: "Ask the respondent to pin down a vague or hedged statement \
                          about a specific concept."
                .to_string(),
            signal_weights: weights(&[
                ("llm.ambiguity", 0.9),
                ("llm.hedging.high", 0.5),
                ("graph.node.freshness", 0.4),
                ("graph.node.exhaustion_score", -0.6),
            ]),
            generates_closing_question: false,
            focus_mode: FocusMode::RecentNode,
            node_binding: NodeBinding::Required,
        },
        StrategyConfig {
            name: "reflect".to_string(),
            description: "Play back the discussion so far and invite corrections \
                          or additions."
                .to_string(),
            signal_weights: weights(&[
                ("temporal.turns_since_summary", 0.5),
                ("llm.engagement.low", 0.4),
                ("temporal.strategy_repetition_count", -0.3),
            ]),
            generates_closing_question: false,
            focus_mode: FocusMode::Summary,
            node_binding: NodeBinding::None,
        },
        StrategyConfig {
            name: "close".to_string(),
            description: "Wind the interview down with a final synthesizing question."
                .to_string(),
            signal_weights: weights(&[
                ("graph.saturation", 0.9),
                ("llm.engagement.low", 0.3),
            ]),
            generates_closing_question: true,
            focus_mode: FocusMode::Summary,
            node_binding: NodeBinding::None,
        },
    ]
}

fn standard_phase_table() -> PhaseTable {
    let mut early = BTreeMap::new();
    early.insert(
        "broaden".to_string(),
        PhaseAdjustment {
            multiplier: 1.5,
            bonus: 0.0,
        },
    );
    early.insert(
        "close".to_string(),
        PhaseAdjustment {
            multiplier: 0.0,
            bonus: 0.0,
        },
    );

    let mut mid = BTreeMap::new();
    mid.insert(
        "close".to_string(),
        PhaseAdjustment {
            multiplier: 0.3,
            bonus: 0.0,
        },
    );

    let mut late = BTreeMap::new();
    late.insert(
        "broaden".to_string(),
        PhaseAdjustment {
            multiplier: 0.5,
            bonus: 0.0,
        },
    );
    late.insert(
        "close".to_string(),
        PhaseAdjustment {
            multiplier: 1.0,
            bonus: 0.5,
        },
    );

    PhaseTable {
        mid_starts_at_turn: 4,
        late_starts_at_turn: 10,
        early,
        mid,
        late,
    }
}

fn weights(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, weight)| (key.to_string(), *weight))
        .collect()
}

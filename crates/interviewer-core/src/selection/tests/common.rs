use crate::methodology::{
    FocusMode, Methodology, NodeBinding, PhaseTable, StrategyConfig,
};
use crate::selection::{SelectionEngine, TurnRequest};
use crate::signals::{NodeCandidate, SignalSnapshot};

pub(super) fn methodology(strategies: Vec<StrategyConfig>) -> Methodology {
    Methodology {
        name: "test-methodology".to_string(),
        strategies,
        phases: PhaseTable::default(),
    }
}

pub(super) fn engine(strategies: Vec<StrategyConfig>) -> SelectionEngine {
    SelectionEngine::new(methodology(strategies)).expect("test methodology validates")
}

pub(super) fn node_bound(name: &str) -> StrategyConfig {
    let mut strategy = StrategyConfig::named(name);
    strategy.node_binding = NodeBinding::Required;
    strategy.focus_mode = FocusMode::RecentNode;
    strategy
}

pub(super) fn signals(entries: &[(&str, f64)]) -> SignalSnapshot {
    let mut snapshot = SignalSnapshot::new();
    for (key, value) in entries {
        snapshot.set(*key, *value);
    }
    snapshot
}

pub(super) fn candidate(id: &str, entries: &[(&str, f64)]) -> NodeCandidate {
    let mut candidate = NodeCandidate::new(id);
    for (key, value) in entries {
        candidate.signals.set(*key, *value);
    }
    candidate
}

pub(super) fn request(turn: u32, global: &[(&str, f64)]) -> TurnRequest {
    TurnRequest::for_turn(turn, signals(global))
}

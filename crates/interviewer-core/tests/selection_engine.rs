use interviewer_core::methodology::{
    FocusMode, InterviewPhase, Methodology, NodeBinding, PhaseAdjustment, PhaseTable,
    StrategyConfig,
};
use interviewer_core::selection::{CandidateScope, SelectionEngine, TurnRequest};
use interviewer_core::signals::{NodeCandidate, SignalSnapshot};

fn snapshot(entries: &[(&str, f64)]) -> SignalSnapshot {
    let mut snapshot = SignalSnapshot::new();
    for (key, value) in entries {
        snapshot.set(*key, *value);
    }
    snapshot
}

fn plain_methodology(strategies: Vec<StrategyConfig>) -> Methodology {
    Methodology {
        name: "integration".to_string(),
        strategies,
        phases: PhaseTable::default(),
    }
}

#[test]
fn weighted_ranking_matches_the_documented_example() {
    // A {x: 0.8} vs B {x: 0.5} over {x: 1.0} with no phase table.
    let engine = SelectionEngine::new(plain_methodology(vec![
        StrategyConfig::named("A").with_weight("x", 0.8),
        StrategyConfig::named("B").with_weight("x", 0.5),
    ]))
    .expect("methodology validates");

    let selection = engine
        .select(&TurnRequest::for_turn(1, snapshot(&[("x", 1.0)])))
        .expect("selection succeeds");

    assert_eq!(selection.strategy_name, "A");
    assert!((selection.decomposition[0].final_score - 0.8).abs() < 1e-12);
    assert!((selection.decomposition[1].final_score - 0.5).abs() < 1e-12);
}

#[test]
fn phase_multiplier_example_flips_the_winner() {
    let mut methodology = plain_methodology(vec![
        StrategyConfig::named("A").with_weight("x", 0.8),
        StrategyConfig::named("B").with_weight("x", 0.5),
    ]);
    methodology.phases.early.insert(
        "B".to_string(),
        PhaseAdjustment {
            multiplier: 2.0,
            bonus: 0.0,
        },
    );
    let engine = SelectionEngine::new(methodology).expect("methodology validates");

    let selection = engine
        .select(&TurnRequest::for_turn(1, snapshot(&[("x", 1.0)])))
        .expect("selection succeeds");

    assert_eq!(selection.strategy_name, "B");
    assert!((selection.decomposition[0].final_score - 1.0).abs() < 1e-12);
}

#[test]
fn node_binding_example_selects_the_exhausted_node() {
    let mut deepen = StrategyConfig::named("C")
        .with_weight("graph.node.exhaustion_score", 1.0);
    deepen.node_binding = NodeBinding::Required;
    let engine =
        SelectionEngine::new(plain_methodology(vec![deepen])).expect("methodology validates");

    let mut n1 = NodeCandidate::new("n1");
    n1.signals.set("graph.node.exhaustion_score", 0.2);
    let mut n2 = NodeCandidate::new("n2");
    n2.signals.set("graph.node.exhaustion_score", 0.9);

    let mut request = TurnRequest::for_turn(3, SignalSnapshot::new());
    request.node_candidates = vec![n1, n2];

    let selection = engine.select(&request).expect("selection succeeds");
    assert_eq!(selection.focus, "n2");
}

#[test]
fn identical_inputs_produce_identical_outcomes() {
    let mut methodology = plain_methodology(vec![
        StrategyConfig::named("broaden")
            .with_weight("llm.engagement", 0.5)
            .with_weight("graph.saturation", 0.7),
        StrategyConfig::named("reflect").with_weight("temporal.turns_since_summary", 0.5),
    ]);
    methodology.strategies[1].focus_mode = FocusMode::Summary;
    let engine = SelectionEngine::new(methodology).expect("methodology validates");

    let mut request = TurnRequest::for_turn(
        6,
        snapshot(&[
            ("llm.engagement", 0.42),
            ("graph.saturation", 0.13),
            ("temporal.turns_since_summary", 0.77),
        ]),
    );
    request.topic = "grocery shopping".to_string();

    let first = engine.select(&request).expect("selection succeeds");
    let second = engine.select(&request).expect("selection succeeds");
    assert_eq!(first, second);
}

#[test]
fn decomposition_is_attached_but_never_steers() {
    // The selector has a single scoring path; reading or discarding the
    // decomposition must leave the outcome untouched.
    let engine = SelectionEngine::new(plain_methodology(vec![
        StrategyConfig::named("a").with_weight("x", 0.6),
        StrategyConfig::named("b").with_weight("y", 0.9),
    ]))
    .expect("methodology validates");
    let request = TurnRequest::for_turn(1, snapshot(&[("x", 1.0), ("y", 0.5)]));

    let full = engine.select(&request).expect("selection succeeds");
    let ignored = engine.select(&request).expect("selection succeeds");

    assert_eq!(full.strategy_name, ignored.strategy_name);
    assert_eq!(full.focus, ignored.focus);
    assert!(!full.decomposition.is_empty());
}

#[test]
fn stage_one_scores_over_global_scope_only() {
    let mut bound = StrategyConfig::named("deepen")
        .with_weight("llm.valence", 0.5)
        .with_weight("graph.node.exhaustion_score", -3.0);
    bound.node_binding = NodeBinding::Required;
    let engine = SelectionEngine::new(plain_methodology(vec![
        bound,
        StrategyConfig::named("broaden").with_weight("llm.valence", 0.4),
    ]))
    .expect("methodology validates");

    // The node-scope penalty must not leak into Stage 1 even when a
    // same-named key appears in the global snapshot.
    let mut request = TurnRequest::for_turn(
        2,
        snapshot(&[("llm.valence", 1.0), ("graph.node.exhaustion_score", 1.0)]),
    );
    request.node_candidates = vec![NodeCandidate::new("n1")];

    let selection = engine.select(&request).expect("selection succeeds");
    assert_eq!(selection.strategy_name, "deepen");

    let stage_one = selection
        .decomposition
        .iter()
        .find(|record| {
            record.scope == CandidateScope::Strategy && record.identifier == "deepen"
        })
        .expect("deepen recorded");
    assert_eq!(stage_one.signal_contributions.len(), 1);
    assert_eq!(stage_one.signal_contributions[0].name, "llm.valence");
    assert!((stage_one.final_score - 0.5).abs() < 1e-12);
}

#[test]
fn empty_first_turn_prefers_an_unbound_strategy() {
    let mut deepen = StrategyConfig::named("deepen").with_weight("x", 2.0);
    deepen.node_binding = NodeBinding::Required;
    let mut broaden = StrategyConfig::named("broaden").with_weight("x", 0.1);
    broaden.focus_mode = FocusMode::Topic;
    let engine = SelectionEngine::new(plain_methodology(vec![deepen, broaden]))
        .expect("methodology validates");

    let mut request = TurnRequest::for_turn(1, snapshot(&[("x", 1.0)]));
    request.topic = "morning routines".to_string();

    let selection = engine.select(&request).expect("selection succeeds");
    assert_eq!(selection.strategy_name, "broaden");
    assert_eq!(selection.focus, "morning routines");
    assert_eq!(selection.phase, InterviewPhase::Early);
}

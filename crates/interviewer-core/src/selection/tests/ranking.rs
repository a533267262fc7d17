use super::common::*;
use crate::methodology::{InterviewPhase, PhaseAdjustment, StrategyConfig};
use crate::selection::SelectionEngine;

#[test]
fn higher_weighted_strategy_wins() {
    let engine = engine(vec![
        StrategyConfig::named("a").with_weight("x", 0.8),
        StrategyConfig::named("b").with_weight("x", 0.5),
    ]);

    let selection = engine
        .select(&request(1, &[("x", 1.0)]))
        .expect("selection succeeds");

    assert_eq!(selection.strategy_name, "a");
    let a = &selection.decomposition[0];
    let b = &selection.decomposition[1];
    assert_eq!(a.identifier, "a");
    assert!((a.final_score - 0.8).abs() < 1e-12);
    assert_eq!(b.identifier, "b");
    assert!((b.final_score - 0.5).abs() < 1e-12);
}

#[test]
fn phase_multiplier_can_overturn_the_base_order() {
    let mut methodology = methodology(vec![
        StrategyConfig::named("a").with_weight("x", 0.8),
        StrategyConfig::named("b").with_weight("x", 0.5),
    ]);
    methodology.phases.early.insert(
        "b".to_string(),
        PhaseAdjustment {
            multiplier: 2.0,
            bonus: 0.0,
        },
    );
    let engine = SelectionEngine::new(methodology).expect("methodology validates");

    let selection = engine
        .select(&request(1, &[("x", 1.0)]))
        .expect("selection succeeds");

    assert_eq!(selection.strategy_name, "b");
    assert!((selection.decomposition[0].final_score - 1.0).abs() < 1e-12);
    assert!((selection.decomposition[1].final_score - 0.8).abs() < 1e-12);
}

#[test]
fn phase_bonus_is_additive_after_the_multiplier() {
    let mut methodology = methodology(vec![StrategyConfig::named("a").with_weight("x", 0.5)]);
    methodology.phases.late.insert(
        "a".to_string(),
        PhaseAdjustment {
            multiplier: 2.0,
            bonus: 0.25,
        },
    );
    let engine = SelectionEngine::new(methodology).expect("methodology validates");

    let mut turn = request(1, &[("x", 1.0)]);
    turn.phase_override = Some(InterviewPhase::Late);
    let selection = engine.select(&turn).expect("selection succeeds");

    let record = &selection.decomposition[0];
    assert_eq!(record.phase_multiplier, 2.0);
    assert_eq!(record.phase_bonus, 0.25);
    assert!((record.base_score - 0.5).abs() < 1e-12);
    assert!((record.final_score - 1.25).abs() < 1e-12);
}

#[test]
fn ties_break_by_catalog_order() {
    let engine = engine(vec![
        StrategyConfig::named("first").with_weight("x", 0.5),
        StrategyConfig::named("second").with_weight("x", 0.5),
    ]);

    let selection = engine
        .select(&request(1, &[("x", 1.0)]))
        .expect("selection succeeds");

    assert_eq!(selection.strategy_name, "first");
    assert_eq!(selection.decomposition[0].rank, 1);
    assert_eq!(selection.decomposition[1].rank, 2);
}

#[test]
fn negative_weights_penalize() {
    let engine = engine(vec![
        StrategyConfig::named("repeat")
            .with_weight("x", 1.0)
            .with_weight("temporal.strategy_repetition_count", -2.0),
        StrategyConfig::named("switch").with_weight("x", 0.4),
    ]);

    let selection = engine
        .select(&request(
            1,
            &[("x", 1.0), ("temporal.strategy_repetition_count", 0.8)],
        ))
        .expect("selection succeeds");

    // repeat scores 1.0 - 1.6 = -0.6 and loses to switch's 0.4.
    assert_eq!(selection.strategy_name, "switch");
}

#[test]
fn phase_derives_from_turn_unless_overridden() {
    let mut methodology = methodology(vec![StrategyConfig::named("a").with_weight("x", 1.0)]);
    methodology.phases.mid_starts_at_turn = 3;
    methodology.phases.late_starts_at_turn = 6;
    let engine = SelectionEngine::new(methodology).expect("methodology validates");

    let mid = engine
        .select(&request(4, &[("x", 1.0)]))
        .expect("selection succeeds");
    assert_eq!(mid.phase, InterviewPhase::Mid);

    let mut overridden = request(4, &[("x", 1.0)]);
    overridden.phase_override = Some(InterviewPhase::Late);
    let late = engine.select(&overridden).expect("selection succeeds");
    assert_eq!(late.phase, InterviewPhase::Late);
}

#[test]
fn selection_is_deterministic() {
    let engine = engine(vec![
        StrategyConfig::named("a").with_weight("x", 0.31).with_weight("y", -0.2),
        StrategyConfig::named("b").with_weight("x", 0.3),
        StrategyConfig::named("c").with_weight("y", 0.29),
    ]);
    let turn = request(2, &[("x", 0.97), ("y", 0.03)]);

    let first = engine.select(&turn).expect("selection succeeds");
    let second = engine.select(&turn).expect("selection succeeds");
    assert_eq!(first, second);
}

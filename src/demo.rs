use crate::error::AppError;
use interviewer_core::methodology::Methodology;
use interviewer_core::selection::{CandidateScope, SelectionEngine, TurnRequest};
use interviewer_core::signals::{NodeCandidate, SignalSnapshot};

/// Walk the built-in methodology through one mid-interview turn and print
/// the full scoring decomposition for stakeholder walkthroughs.
pub(crate) fn run() -> Result<(), AppError> {
    let engine = SelectionEngine::new(Methodology::standard())?;

    let mut global = SignalSnapshot::new();
    global.set("llm.engagement", 0.62);
    global.mark_fired("llm.specificity.low");
    global.set("graph.saturation", 0.35);
    global.set("temporal.strategy_repetition_count", 0.25);
    global.set("temporal.turns_since_summary", 0.4);

    let mut price = NodeCandidate::new("price");
    price.signals.set("graph.node.freshness", 0.25);
    price.signals.set("graph.node.exhaustion_score", 0.75);
    price.signals.set("graph.node.degree", 0.8);
    let mut comfort = NodeCandidate::new("comfort");
    comfort.signals.set("graph.node.freshness", 1.0);
    comfort.signals.set("graph.node.exhaustion_score", 0.0);
    comfort.signals.set("graph.node.degree", 0.2);

    let mut request = TurnRequest::for_turn(6, global);
    request.node_candidates = vec![price, comfort];
    request.recent_nodes = vec!["comfort".to_string(), "price".to_string()];
    request.topic = "choosing a commuter bike".to_string();

    let selection = engine.select(&request)?;

    println!("Adaptive interviewer demo");
    println!(
        "Turn {} ({} phase) on topic: {}",
        request.turn, selection.phase, request.topic
    );
    println!(
        "Selected strategy: {} (closing: {})",
        selection.strategy_name,
        if selection.generates_closing_question {
            "yes"
        } else {
            "no"
        }
    );
    println!("  Intent: {}", selection.strategy_description);
    println!("Resolved focus: {}", selection.focus);

    println!("\nStage 1 — strategy ranking:");
    print_scope(&selection, CandidateScope::Strategy);
    println!("\nStage 2 — focus node ranking:");
    print_scope(&selection, CandidateScope::Node);

    Ok(())
}

fn print_scope(
    selection: &interviewer_core::selection::TurnSelection,
    scope: CandidateScope,
) {
    for record in selection
        .decomposition
        .iter()
        .filter(|record| record.scope == scope)
    {
        println!(
            "  #{rank} {identifier}: final {final_score:+.3} (base {base:+.3} x {multiplier:.2} + {bonus:+.2}){marker}",
            rank = record.rank,
            identifier = record.identifier,
            final_score = record.final_score,
            base = record.base_score,
            multiplier = record.phase_multiplier,
            bonus = record.phase_bonus,
            marker = if record.selected { "  <- selected" } else { "" },
        );
        for contribution in &record.signal_contributions {
            println!(
                "       {name}: {value:.2} x {weight:+.2} = {contribution:+.3}",
                name = contribution.name,
                value = contribution.value,
                weight = contribution.weight,
                contribution = contribution.contribution,
            );
        }
    }
}

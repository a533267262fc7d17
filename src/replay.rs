use crate::error::AppError;
use chrono::Local;
use clap::Args;
use interviewer_core::config::AppConfig;
use interviewer_core::methodology::Methodology;
use interviewer_core::selection::{CandidateScope, SelectionEngine, TurnRequest};
use interviewer_core::signals::buckets::{apply, audit_trace, BucketRule};
use interviewer_core::signals::{NodeCandidate, SignalSnapshot};
use interviewer_core::trackers::{NodeFreshnessTracker, StrategyRepetitionTracker};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// Recorded signal trace (CSV with turn,node,key,value columns; empty
    /// node column means a global signal)
    pub(crate) trace: PathBuf,
    /// Methodology file (defaults to APP_METHODOLOGY, then the built-in)
    #[arg(long)]
    pub(crate) methodology: Option<PathBuf>,
    /// Bucket discretization rules (JSON array) to apply and audit
    #[arg(long)]
    pub(crate) buckets: Option<PathBuf>,
    /// Interview topic label used for topic-focused strategies
    #[arg(long)]
    pub(crate) topic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TraceRow {
    turn: u32,
    #[serde(default)]
    node: String,
    key: String,
    value: f64,
}

#[derive(Debug, Default)]
struct TurnData {
    global: SignalSnapshot,
    candidates: Vec<NodeCandidate>,
}

impl TurnData {
    fn record(&mut self, row: TraceRow) {
        if row.node.is_empty() {
            self.global.set(row.key, row.value);
        } else {
            let position = match self
                .candidates
                .iter()
                .position(|candidate| candidate.id == row.node)
            {
                Some(position) => position,
                None => {
                    self.candidates.push(NodeCandidate::new(row.node.clone()));
                    self.candidates.len() - 1
                }
            };
            self.candidates[position].signals.set(row.key, row.value);
        }
    }
}

fn read_trace(path: &PathBuf) -> Result<BTreeMap<u32, TurnData>, AppError> {
    let mut reader = csv::Reader::from_path(path).map_err(AppError::Trace)?;
    let mut turns: BTreeMap<u32, TurnData> = BTreeMap::new();
    for row in reader.deserialize::<TraceRow>() {
        let row = row?;
        turns.entry(row.turn).or_default().record(row);
    }
    Ok(turns)
}

fn read_bucket_rules(path: &PathBuf) -> Result<Vec<BucketRule>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn run(args: ReplayArgs, config: &AppConfig) -> Result<(), AppError> {
    let methodology = match args.methodology.or_else(|| config.methodology_path.clone()) {
        Some(path) => Methodology::from_json_file(path)?,
        None => {
            info!("no methodology configured, replaying with the built-in standard catalog");
            Methodology::standard()
        }
    };
    let engine = SelectionEngine::new(methodology)?;

    let rules = match &args.buckets {
        Some(path) => read_bucket_rules(path)?,
        None => Vec::new(),
    };
    let turns = read_trace(&args.trace)?;
    let topic = args.topic.unwrap_or_default();

    let mut repetition = StrategyRepetitionTracker::new(config.trackers.repetition_saturation);
    let mut freshness = NodeFreshnessTracker::new(config.trackers.freshness_capacity, 0.6);
    let mut recent_nodes: Vec<String> = Vec::new();
    let mut audited_globals = Vec::new();
    let mut closing_turn = None;

    let started_at = Local::now();
    println!(
        "Replay of {} against methodology '{}' started {}",
        args.trace.display(),
        engine.methodology().name,
        started_at.format("%Y-%m-%d %H:%M:%S"),
    );

    for (turn, data) in &turns {
        let mut global = data.global.clone();
        apply(&rules, &mut global);
        repetition.annotate(&mut global);
        audited_globals.push(data.global.clone());

        let mut candidates = data.candidates.clone();
        freshness.annotate(&mut candidates);

        let mut request = TurnRequest::for_turn(*turn, global);
        request.node_candidates = candidates;
        request.recent_nodes = recent_nodes.clone();
        request.topic = topic.clone();

        let selection = engine.select(&request)?;
        repetition.record(&selection.strategy_name);
        let bound_to_node = selection.decomposition.iter().any(|record| {
            record.scope == CandidateScope::Node
                && record.selected
                && record.identifier == selection.focus
        });
        if bound_to_node {
            freshness.observe(&selection.focus);
            recent_nodes.retain(|label| label != &selection.focus);
            recent_nodes.insert(0, selection.focus.clone());
        }
        if selection.generates_closing_question && closing_turn.is_none() {
            closing_turn = Some(*turn);
        }

        println!(
            "turn {turn:>3} [{phase}] strategy={strategy} focus=\"{focus}\"{closing}",
            phase = selection.phase,
            strategy = selection.strategy_name,
            focus = selection.focus,
            closing = if selection.generates_closing_question {
                " (closing)"
            } else {
                ""
            },
        );
    }

    println!("\nReplayed {} turns", turns.len());
    match closing_turn {
        Some(turn) => println!("First closing question at turn {turn}"),
        None => println!("No closing question fired"),
    }

    if !rules.is_empty() {
        println!("\nBucket calibration audit:");
        for entry in audit_trace(&rules, &audited_globals) {
            let note = if entry.never_fired() {
                "  <- never fired, check the threshold"
            } else {
                ""
            };
            println!(
                "  {key}: fired on {fired}/{total} turns{note}",
                key = entry.key(),
                fired = entry.fired_turns,
                total = entry.total_turns,
            );
        }
    }

    Ok(())
}

mod demo;
mod error;
mod replay;
mod telemetry;

use clap::{Args, Parser, Subcommand};
use error::AppError;
use interviewer_core::config::AppConfig;
use interviewer_core::methodology::Methodology;
use interviewer_core::selection::{SelectionEngine, TurnRequest};
use interviewer_core::signals::{NodeCandidate, SignalSnapshot};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Adaptive Interviewer",
    about = "Inspect and exercise the adaptive strategy selection engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a methodology file and report the first problem found
    Validate {
        /// Methodology JSON file
        path: PathBuf,
    },
    /// Score one turn and print the selected strategy and focus
    Select(SelectArgs),
    /// Replay a recorded multi-turn signal trace through the engine
    Replay(replay::ReplayArgs),
    /// Walk the built-in methodology through a canned turn
    Demo,
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Global signal snapshot (JSON object of key -> number|bool)
    #[arg(long)]
    signals: PathBuf,
    /// Methodology file (defaults to APP_METHODOLOGY, then the built-in)
    #[arg(long)]
    methodology: Option<PathBuf>,
    /// Candidate focus nodes (JSON array of {id, signals})
    #[arg(long)]
    nodes: Option<PathBuf>,
    /// 1-based turn index, used to derive the interview phase
    #[arg(long, default_value_t = 1)]
    turn: u32,
    /// Recently discussed node labels, most recent first
    #[arg(long = "recent")]
    recent: Vec<String>,
    /// Interview topic label
    #[arg(long)]
    topic: Option<String>,
    /// Print the full scoring decomposition as JSON
    #[arg(long)]
    decomposition: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    match cli.command {
        Command::Validate { path } => run_validate(&path),
        Command::Select(args) => run_select(args, &config),
        Command::Replay(args) => replay::run(args, &config),
        Command::Demo => demo::run(),
    }
}

fn run_validate(path: &Path) -> Result<(), AppError> {
    let methodology = Methodology::from_json_file(path)?;
    println!(
        "Methodology '{}' is valid: {} strategies, phases mid@{} late@{}",
        methodology.name,
        methodology.strategies.len(),
        methodology.phases.mid_starts_at_turn,
        methodology.phases.late_starts_at_turn,
    );
    Ok(())
}

fn run_select(args: SelectArgs, config: &AppConfig) -> Result<(), AppError> {
    let methodology = load_methodology(args.methodology, config)?;
    let engine = SelectionEngine::new(methodology)?;

    let global_signals: SignalSnapshot = read_json(&args.signals)?;
    let node_candidates: Vec<NodeCandidate> = match &args.nodes {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let mut request = TurnRequest::for_turn(args.turn, global_signals);
    request.node_candidates = node_candidates;
    request.recent_nodes = args.recent;
    request.topic = args.topic.unwrap_or_default();

    let selection = engine.select(&request)?;

    println!("Turn {} ({} phase)", request.turn, selection.phase);
    println!("Strategy: {}", selection.strategy_name);
    if !selection.strategy_description.is_empty() {
        println!("  Intent: {}", selection.strategy_description);
    }
    println!("Focus: {}", selection.focus);
    println!(
        "Closing question: {}",
        if selection.generates_closing_question {
            "yes"
        } else {
            "no"
        }
    );
    if args.decomposition {
        let json = serde_json::to_string_pretty(&selection.decomposition)?;
        println!("Decomposition:\n{json}");
    }
    Ok(())
}

fn load_methodology(
    override_path: Option<PathBuf>,
    config: &AppConfig,
) -> Result<Methodology, AppError> {
    match override_path.or_else(|| config.methodology_path.clone()) {
        Some(path) => Ok(Methodology::from_json_file(path)?),
        None => {
            info!("no methodology configured, using the built-in standard catalog");
            Ok(Methodology::standard())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

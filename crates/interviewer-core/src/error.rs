use crate::methodology::InterviewPhase;
use std::path::PathBuf;

/// Rejection raised while loading or validating a methodology. Always fatal
/// for the load; the engine never coerces a broken catalog into defaults.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("methodology '{methodology}' declares no strategies")]
    EmptyCatalog { methodology: String },
    #[error("strategy {index} has an empty name")]
    EmptyStrategyName { index: usize },
    #[error("strategy {index} ('{name}') duplicates the name of an earlier strategy")]
    DuplicateStrategyName { index: usize, name: String },
    #[error("strategy {index} ('{name}') has a non-finite weight for signal '{signal}'")]
    NonFiniteWeight {
        index: usize,
        name: String,
        signal: String,
    },
    #[error("phase table places mid start (turn {mid_starts_at_turn}) after late start (turn {late_starts_at_turn})")]
    PhaseBoundaryOrder {
        mid_starts_at_turn: u32,
        late_starts_at_turn: u32,
    },
    #[error("{phase} phase adjustments name unknown strategy '{name}'")]
    UnknownPhaseStrategy { phase: InterviewPhase, name: String },
    #[error("{phase} phase adjustment for '{name}' has a non-finite {field}")]
    NonFinitePhaseAdjustment {
        phase: InterviewPhase,
        name: String,
        field: &'static str,
    },
    #[error("failed to read methodology file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse methodology file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raised when every strategy in the catalog requires node binding and the
/// turn arrived with no candidate nodes. Fatal for the turn; the calling
/// pipeline owns the opening-question fallback.
#[derive(Debug, thiserror::Error)]
#[error("no eligible strategy: all {node_bound_strategies} strategies require node binding and no candidate nodes were supplied")]
pub struct NoEligibleStrategyError {
    pub node_bound_strategies: usize,
}

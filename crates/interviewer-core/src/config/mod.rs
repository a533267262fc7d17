use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the interviewer binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    /// Default methodology file used when a command omits `--methodology`.
    pub methodology_path: Option<PathBuf>,
    pub trackers: TrackerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let methodology_path = env::var("APP_METHODOLOGY").ok().map(PathBuf::from);

        let repetition_saturation = env::var("APP_REPETITION_SATURATION")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidRepetitionSaturation)?;

        let freshness_capacity = env::var("APP_FRESHNESS_CAPACITY")
            .unwrap_or_else(|_| "64".to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidFreshnessCapacity)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            methodology_path,
            trackers: TrackerConfig {
                repetition_saturation,
                freshness_capacity,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Bounds for the cross-turn history trackers wired up by `replay`.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub repetition_saturation: u32,
    pub freshness_capacity: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRepetitionSaturation,
    InvalidFreshnessCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRepetitionSaturation => {
                write!(f, "APP_REPETITION_SATURATION must be a positive integer")
            }
            ConfigError::InvalidFreshnessCapacity => {
                write!(f, "APP_FRESHNESS_CAPACITY must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_METHODOLOGY");
        env::remove_var("APP_REPETITION_SATURATION");
        env::remove_var("APP_FRESHNESS_CAPACITY");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.methodology_path.is_none());
        assert_eq!(config.trackers.repetition_saturation, 5);
        assert_eq!(config.trackers.freshness_capacity, 64);
    }

    #[test]
    fn rejects_non_numeric_tracker_bounds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_REPETITION_SATURATION", "soon");
        let error = AppConfig::load().expect_err("load fails");
        assert!(matches!(error, ConfigError::InvalidRepetitionSaturation));
        reset_env();
    }
}

use super::Methodology;
use crate::error::ConfigurationError;
use std::fs;
use std::path::Path;

impl Methodology {
    /// Load and validate a methodology from a JSON file. Any structural or
    /// semantic problem aborts the load with the file path attached.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let methodology: Methodology =
            serde_json::from_str(&raw).map_err(|source| ConfigurationError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        methodology.validate()?;
        Ok(methodology)
    }
}

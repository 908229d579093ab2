// Simulation configuration (TOML).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lottery::MAX_MATRIX_ITERATIONS;

/// Matrix iterations used when the config omits the field.
pub const DEFAULT_MATRIX_ITERATIONS: usize = 10_000;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config: {source}")]
    ParseError {
        #[from]
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[simulation]` table.
#[derive(Debug, Clone, Deserialize)]
struct SimulationFile {
    simulation: SimulationConfig,
}

/// Knobs for one draft run.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub draft_year: u16,
    /// Run the weighted draw for the top four picks. Off means the first
    /// round goes straight by record.
    #[serde(default = "default_simulate_lottery")]
    pub simulate_lottery: bool,
    /// Fixed seed for a reproducible run. Omit for a fresh random seed.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_matrix_iterations")]
    pub matrix_iterations: usize,
}

fn default_simulate_lottery() -> bool {
    true
}

fn default_matrix_iterations() -> usize {
    DEFAULT_MATRIX_ITERATIONS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            draft_year: 2026,
            simulate_lottery: true,
            seed: None,
            matrix_iterations: DEFAULT_MATRIX_ITERATIONS,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

impl SimulationConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: SimulationFile = toml::from_str(text)?;
        file.simulation.validate()?;
        Ok(file.simulation)
    }

    /// Load a config from a TOML file on disk.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.matrix_iterations == 0 || self.matrix_iterations > MAX_MATRIX_ITERATIONS {
            return Err(ConfigError::ValidationError {
                field: "matrix_iterations".to_string(),
                message: format!("must be between 1 and {MAX_MATRIX_ITERATIONS}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let text = r#"
            [simulation]
            draft_year = 2026
            simulate_lottery = true
            seed = 12345
            matrix_iterations = 5000
        "#;
        let config = SimulationConfig::from_toml_str(text).expect("should parse");
        assert_eq!(config.draft_year, 2026);
        assert!(config.simulate_lottery);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.matrix_iterations, 5000);
    }

    #[test]
    fn optional_fields_take_defaults() {
        let text = r#"
            [simulation]
            draft_year = 2026
        "#;
        let config = SimulationConfig::from_toml_str(text).unwrap();
        assert!(config.simulate_lottery);
        assert_eq!(config.seed, None);
        assert_eq!(config.matrix_iterations, DEFAULT_MATRIX_ITERATIONS);
    }

    #[test]
    fn rejects_zero_iterations() {
        let text = r#"
            [simulation]
            draft_year = 2026
            matrix_iterations = 0
        "#;
        match SimulationConfig::from_toml_str(text).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "matrix_iterations");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_iterations_above_cap() {
        let text = format!(
            "[simulation]\ndraft_year = 2026\nmatrix_iterations = {}",
            MAX_MATRIX_ITERATIONS + 1
        );
        assert!(matches!(
            SimulationConfig::from_toml_str(&text),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        assert!(matches!(
            SimulationConfig::from_toml_str("not toml ["),
            Err(ConfigError::ParseError { .. })
        ));
    }
}

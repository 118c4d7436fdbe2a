//! Configuration loading for evaluations.
//!
//! Evaluation settings live in the `[evaluation]` table of a scenario file
//! or in a standalone TOML file.

use felicific_core::{CalculusError, SelectionMode, SelfInterestScale, PROPINQUITY_DECAY_EXPONENT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// How a decision is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Which extremum picks the winner
    pub mode: SelectionMode,
    /// Weight on the decision maker's own outcome (unweighted when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_interest_scale: Option<f64>,
    /// Exponent used when an effect gives a `delay` instead of a nearness
    pub propinquity_decay_exponent: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Highest,
            self_interest_scale: None,
            propinquity_decay_exponent: PROPINQUITY_DECAY_EXPONENT,
        }
    }
}

impl EvaluationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerializeError)
    }

    /// The validated self-interest scale, if one is configured.
    pub fn self_interest(&self) -> Result<Option<SelfInterestScale>, CalculusError> {
        self.self_interest_scale
            .map(SelfInterestScale::new)
            .transpose()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    IoError(#[source] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    TomlError(#[source] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[source] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Evaluation Configuration

# highest | lowest | least_negative
mode = "highest"

# Weight on the decision maker's own outcome, between 0 (altruistic) and
# 1 (egoistic). Leave unset to sum every actor equally.
# self_interest_scale = 0.5

# Nearness of an effect given as a delay is 1 / delay^exponent
propinquity_decay_exponent = 0.1
"#
    .to_string()
}

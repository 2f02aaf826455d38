//! Typed sessionizer configuration.
//!
//! The shipped binary always runs with [`SessionizerConfig::default`]. Library
//! callers that keep their settings in YAML can build a config with
//! [`SessionizerConfig::parse`]; every field has a default, so an empty
//! document is valid.

use serde::Deserialize;

use crate::grouping::DEFAULT_GAP_THRESHOLD_SECS;

/// Errors that can occur when parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Sessionizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SessionizerConfig {
    /// Maximum seconds between consecutive events of one session.
    #[serde(default = "default_gap_threshold_secs")]
    pub gap_threshold_secs: u64,
}

impl SessionizerConfig {
    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML or a
    /// field has the wrong type.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

impl Default for SessionizerConfig {
    fn default() -> Self {
        Self {
            gap_threshold_secs: default_gap_threshold_secs(),
        }
    }
}

const fn default_gap_threshold_secs() -> u64 {
    DEFAULT_GAP_THRESHOLD_SECS
}

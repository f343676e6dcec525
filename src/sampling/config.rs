//! Sampling configuration.
//!
//! Budgets and thresholds are held in an immutable [`SamplingConfig`]. Each
//! mode has its own defaults; a JSON file and command-line flags can override
//! individual fields through [`ConfigOverrides`], applied in that order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::SamplingMode;
use crate::sampling::classify::OrientationThresholds;
use crate::sampling::decision::{DecisionThresholds, RATIO_SENTINEL};

/// Confident reads to collect in single-end mode
pub const DEFAULT_SINGLE_TARGET: usize = 2;

/// Alignment attempts allowed in single-end mode
pub const DEFAULT_SINGLE_MAX_ATTEMPTS: usize = 200;

/// Confident pairs to collect in paired-end mode
pub const DEFAULT_PAIRED_TARGET: usize = 10;

/// Alignment attempts allowed in paired-end mode
pub const DEFAULT_PAIRED_MAX_ATTEMPTS: usize = 1000;

/// Records of the mate file scanned per lookup
pub const DEFAULT_MATE_LOOKAHEAD: usize = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Budgets and thresholds for one sampling run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingConfig {
    /// Classified observations needed before deciding
    pub target_confident: usize,
    /// Hard cap on read-1 alignment attempts
    pub max_attempts: usize,
    /// Records of the first file to skip before sampling
    pub start_offset: u64,
    /// Records of the mate file scanned per lookup
    pub mate_lookahead: usize,
    /// Compare mate identifiers without a trailing `/1` or `/2`
    pub strip_mate_suffix: bool,
    pub orientation: OrientationThresholds,
    pub decision: DecisionThresholds,
}

impl SamplingConfig {
    /// Defaults for the given mode
    #[must_use]
    pub fn for_mode(mode: SamplingMode) -> Self {
        let (target_confident, max_attempts) = match mode {
            SamplingMode::Single => (DEFAULT_SINGLE_TARGET, DEFAULT_SINGLE_MAX_ATTEMPTS),
            SamplingMode::Paired => (DEFAULT_PAIRED_TARGET, DEFAULT_PAIRED_MAX_ATTEMPTS),
        };

        Self {
            target_confident,
            max_attempts,
            start_offset: 0,
            mate_lookahead: DEFAULT_MATE_LOOKAHEAD,
            strip_mate_suffix: false,
            orientation: OrientationThresholds::default(),
            decision: DecisionThresholds::default(),
        }
    }

    /// Return a copy with every field present in `overrides` replaced
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.clone();

        if let Some(v) = overrides.target_confident {
            config.target_confident = v;
        }
        if let Some(v) = overrides.max_attempts {
            config.max_attempts = v;
        }
        if let Some(v) = overrides.start_offset {
            config.start_offset = v;
        }
        if let Some(v) = overrides.mate_lookahead {
            config.mate_lookahead = v;
        }
        if let Some(v) = overrides.strip_mate_suffix {
            config.strip_mate_suffix = v;
        }
        if let Some(v) = overrides.inward_max_distance {
            config.orientation.inward_max_distance = v;
        }
        if let Some(v) = overrides.outward_min_distance {
            config.orientation.outward_min_distance = v;
        }
        if let Some(v) = overrides.stranded_ratio {
            config.decision.stranded_ratio = v;
        }

        config
    }

    /// Check that budgets are positive and thresholds are consistent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_confident == 0 {
            return Err(ConfigError::Invalid(
                "target_confident must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.mate_lookahead == 0 {
            return Err(ConfigError::Invalid(
                "mate_lookahead must be at least 1".to_string(),
            ));
        }

        let o = &self.orientation;
        if !(o.outward_min_distance > 0.0 && o.inward_max_distance > 0.0) {
            return Err(ConfigError::Invalid(
                "distance thresholds must be positive".to_string(),
            ));
        }

        let ratio = self.decision.stranded_ratio;
        if !(1.0..RATIO_SENTINEL).contains(&ratio) {
            return Err(ConfigError::Invalid(format!(
                "stranded_ratio must be in [1, {RATIO_SENTINEL}), got {ratio}"
            )));
        }

        Ok(())
    }
}

/// Optional replacements for [`SamplingConfig`] fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub target_confident: Option<usize>,
    pub max_attempts: Option<usize>,
    pub start_offset: Option<u64>,
    pub mate_lookahead: Option<usize>,
    pub strip_mate_suffix: Option<bool>,
    pub inward_max_distance: Option<f64>,
    pub outward_min_distance: Option<f64>,
    pub stranded_ratio: Option<f64>,
}

impl ConfigOverrides {
    /// Load overrides from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read, or
    /// `ConfigError::ParseError` if it is not valid JSON for this type.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse overrides from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

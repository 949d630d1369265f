use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.1;
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
/// The recent tier preallocates its table, so capacity is bounded.
pub const MAX_CACHE_CAPACITY: usize = 1_000_000;
pub const DEFAULT_GENERIC_FALLBACK: &str =
    "I didn't understand. Try asking about:\n- Courses\n- Exams\n- Registration";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Match threshold must be finite, got {0}")]
    InvalidThreshold(f64),
    #[error("Cache capacity {0} exceeds the maximum of {max}", max = MAX_CACHE_CAPACITY)]
    InvalidCapacity(usize),
    #[error("Generic fallback message must not be empty")]
    EmptyGenericFallback,
}

// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum score (inclusive) for a direct answer.
    pub match_threshold: f64,
    /// Maximum number of resolved queries kept besides the warm entries.
    pub cache_capacity: usize,
    /// Response when no entry offers a fallback for the query.
    pub generic_fallback: String,
}

impl EngineConfig {
    pub fn v0() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            generic_fallback: DEFAULT_GENERIC_FALLBACK.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.match_threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.match_threshold));
        }
        if self.cache_capacity > MAX_CACHE_CAPACITY {
            return Err(ConfigError::InvalidCapacity(self.cache_capacity));
        }
        if self.generic_fallback.trim().is_empty() {
            return Err(ConfigError::EmptyGenericFallback);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::v0()
    }
}

//! Search configuration

use crate::eval::Heuristic;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Invalid search configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("timeout threshold must be a positive number of milliseconds, got {0}")]
    BadTimeout(f64),
    #[error("max depth must be at least 1")]
    ZeroMaxDepth,
}

/// Per-agent search settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched by the fixed-depth engine
    pub search_depth: u32,
    /// Evaluation at the search horizon
    pub heuristic: Heuristic,
    /// Remaining time (ms) below which search is abandoned
    pub timeout_ms: f64,
    /// Cap on iterative deepening (None = until the deadline)
    pub max_depth: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            heuristic: Heuristic::WeightedRatio,
            timeout_ms: 10.0,
            max_depth: None,
        }
    }
}

impl SearchConfig {
    /// Config for fixed-depth search at `depth`
    pub fn fixed_depth(depth: u32) -> Self {
        Self {
            search_depth: depth,
            ..Default::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_timeout(mut self, timeout_ms: f64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Check construction preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !(self.timeout_ms.is_finite() && self.timeout_ms > 0.0) {
            return Err(ConfigError::BadTimeout(self.timeout_ms));
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::ZeroMaxDepth);
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config: {}", path.display()))?;
        let config: SearchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse search config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}

//! Configuration types for match play
//!
//! Level 4 - Utilities and configuration

use isolation_core::{ConfigError, SearchConfig, DEFAULT_SIZE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while setting up a game
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid search config: {0}")]
    Search(#[from] ConfigError),
    #[error("board must be at least 1x1, got {width}x{height}")]
    BoardSize { width: i32, height: i32 },
    #[error("per-move time limit must be positive")]
    ZeroTimeLimit,
}

/// Agent type for games
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    /// Fixed-depth minimax
    Minimax,
    /// Iterative-deepening alpha-beta
    #[default]
    AlphaBeta,
    /// Uniformly random legal move
    Random,
}

impl AgentKind {
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Minimax => "minimax",
            AgentKind::AlphaBeta => "alpha-beta",
            AgentKind::Random => "random",
        }
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [AgentKind::Minimax, AgentKind::AlphaBeta, AgentKind::Random]
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown agent kind: {s}"))
    }
}

/// Agent configuration for game playing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub kind: AgentKind,
    /// Search settings (ignored by the random agent)
    pub search: SearchConfig,
    /// Random seed for reproducibility (None = 42)
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Config for fixed-depth minimax at `depth`
    pub fn minimax(depth: u32) -> Self {
        Self {
            kind: AgentKind::Minimax,
            search: SearchConfig::fixed_depth(depth),
            ..Default::default()
        }
    }

    /// Config for iterative-deepening alpha-beta
    pub fn alpha_beta() -> Self {
        Self {
            kind: AgentKind::AlphaBeta,
            ..Default::default()
        }
    }

    /// Config for the random baseline
    pub fn random(seed: u64) -> Self {
        Self {
            kind: AgentKind::Random,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Set search settings
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Game configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub width: i32,
    pub height: i32,
    /// Wall-clock budget per move in milliseconds
    pub time_limit_ms: u64,
    /// Plies after which the game is stopped without a winner
    pub max_moves: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            time_limit_ms: 150,
            max_moves: 1000,
        }
    }
}

impl MatchConfig {
    /// Create config for a `width` x `height` board
    pub fn board(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set per-move time limit
    pub fn with_time_limit(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.width < 1 || self.height < 1 {
            return Err(MatchError::BoardSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.time_limit_ms == 0 {
            return Err(MatchError::ZeroTimeLimit);
        }
        Ok(())
    }
}

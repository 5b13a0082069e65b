//! Isolation Match - Single games between search agents
//!
//! This crate provides:
//! - Agent and match configuration
//! - A seeded random agent as a baseline opponent
//! - A game runner that enforces per-move time limits and forfeits
//!
//! ## Architecture
//!
//! - Level 1: GameRunner::play (orchestration)
//! - Level 2: create_agent, GameRunner::play_from (phases)
//! - Level 3: single turn handling (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod random;

pub use config::{AgentConfig, AgentKind, MatchConfig, MatchError};
pub use game_runner::{create_agent, ForfeitReason, GameEnd, GameOutcome, GameRunner};
pub use random::RandomAgent;

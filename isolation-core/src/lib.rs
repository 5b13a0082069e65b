//! Isolation Core - Adversarial search engine
//!
//! This crate provides:
//! - The game-state interface the search consumes
//! - A reference knight-move isolation board
//! - Terminal utility and mobility heuristics
//! - Deadline-aware minimax and iterative-deepening alpha-beta agents

pub mod ai;
pub mod board;
pub mod config;
pub mod deadline;
pub mod eval;
pub mod game;

// Re-exports for convenient access
pub use ai::{Agent, AlphaBetaAgent, MinimaxAgent, SearchReport};
pub use board::{knight_moves, Board, DEFAULT_SIZE, KNIGHT_DIRECTIONS};
pub use config::{ConfigError, SearchConfig};
pub use deadline::{Countdown, DeadlineGuard, SearchError, TimeLeft};
pub use eval::{terminal_utility, utility, Evaluator, Heuristic, ScoreError, ScoreFn};
pub use game::{GameState, Move, Player};

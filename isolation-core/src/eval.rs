//! Position evaluation
//!
//! Every heuristic first applies the terminal utility rule and only blends
//! mobility terms for undecided positions.

use crate::board::knight_moves;
use crate::game::{GameState, Move, Player};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Bias on the own-mobility weight; distance to center subtracts up to 1.0
pub const CENTER_WEIGHT: f64 = 1.8;

/// Per-ply multiplier in `lookahead_mobility`
const LOOKAHEAD_BASE: f64 = 65.0;

/// Heuristic evaluation failure
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScoreError {
    #[error("heuristic denominator is zero")]
    ZeroDenominator,
    #[error("{0:?} has no location on the board")]
    Unplaced(Player),
}

// ============================================================================
// TERMINAL UTILITY
// ============================================================================

/// Decide a position from move counts alone.
///
/// Returns +inf/-inf when one side is stuck, 0 when the rule does not apply.
pub fn utility(is_active: bool, own_moves: usize, opp_moves: usize) -> f64 {
    if is_active {
        if own_moves == 0 {
            return f64::NEG_INFINITY;
        }
        if opp_moves == 0 {
            return f64::INFINITY;
        }
    } else {
        if opp_moves == 0 {
            return f64::INFINITY;
        }
        if own_moves == 0 {
            return f64::NEG_INFINITY;
        }
    }
    0.0
}

/// Terminal utility of `state` for `player`
pub fn terminal_utility<S: GameState>(state: &S, player: Player) -> f64 {
    let own = state.legal_moves_for(player).len();
    let opp = state.legal_moves_for(player.opponent()).len();
    utility(state.active_player() == player, own, opp)
}

// ============================================================================
// HEURISTICS
// ============================================================================

/// Scoring strategy, fixed when an agent is constructed
pub trait Evaluator<S: GameState> {
    fn score(&self, state: &S, player: Player) -> Result<f64, ScoreError>;
}

/// Built-in heuristics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// `(own - opp) / (own + opp)` with own mobility weighted by centrality
    #[default]
    WeightedRatio,
    /// `own - opp` with own mobility weighted by centrality
    WeightedDiff,
    /// `(own - opp) / (own + opp)` on plain move counts
    MobilityRatio,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::WeightedRatio,
        Heuristic::WeightedDiff,
        Heuristic::MobilityRatio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::WeightedRatio => "weighted-ratio",
            Heuristic::WeightedDiff => "weighted-diff",
            Heuristic::MobilityRatio => "mobility-ratio",
        }
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| format!("unknown heuristic: {s}"))
    }
}

impl<S: GameState> Evaluator<S> for Heuristic {
    fn score(&self, state: &S, player: Player) -> Result<f64, ScoreError> {
        let own_moves = state.legal_moves_for(player).len();
        let opp_moves = state.legal_moves_for(player.opponent()).len();

        let decided = utility(state.active_player() == player, own_moves, opp_moves);
        if decided != 0.0 {
            return Ok(decided);
        }

        match self {
            Heuristic::WeightedRatio => {
                let own = weighted_own_score(state, player, own_moves)?;
                let opp = opp_moves as f64;
                ratio(own - opp, own + opp)
            }
            Heuristic::WeightedDiff => {
                let own = weighted_own_score(state, player, own_moves)?;
                Ok(own - opp_moves as f64)
            }
            Heuristic::MobilityRatio => {
                let own = own_moves as f64;
                let opp = opp_moves as f64;
                ratio(own - opp, own + opp)
            }
        }
    }
}

/// Adapter for a plain scoring closure
pub struct ScoreFn<F>(pub F);

impl<S, F> Evaluator<S> for ScoreFn<F>
where
    S: GameState,
    F: Fn(&S, Player) -> f64,
{
    fn score(&self, state: &S, player: Player) -> Result<f64, ScoreError> {
        Ok((self.0)(state, player))
    }
}

fn ratio(num: f64, den: f64) -> Result<f64, ScoreError> {
    if den == 0.0 {
        return Err(ScoreError::ZeroDenominator);
    }
    Ok(num / den)
}

/// Board center and squared center-to-corner distance
pub fn center_of<S: GameState>(state: &S) -> ((f64, f64), f64) {
    let (width, height) = state.dimensions();
    let center = ((width - 1) as f64 / 2.0, (height - 1) as f64 / 2.0);
    (center, center.0 * center.0 + center.1 * center.1)
}

fn squared_distance(center: (f64, f64), loc: Move) -> f64 {
    let dr = center.0 - loc.row as f64;
    let dc = center.1 - loc.col as f64;
    dr * dr + dc * dc
}

fn weighted_own_score<S: GameState>(
    state: &S,
    player: Player,
    own_moves: usize,
) -> Result<f64, ScoreError> {
    let (center, max_move_score) = center_of(state);
    if max_move_score == 0.0 {
        return Err(ScoreError::ZeroDenominator);
    }
    let loc = state.location(player).ok_or(ScoreError::Unplaced(player))?;
    Ok(own_moves as f64 * (CENTER_WEIGHT - squared_distance(center, loc) / max_move_score))
}

// ============================================================================
// SCORING HELPERS
// ============================================================================

/// Sum of per-move centrality weights: `weight - dist²/max_move_score` each.
///
/// Auxiliary helper for custom evaluators; no built-in heuristic uses it.
pub fn weighted_moves_score(
    moves: &[Move],
    center: (f64, f64),
    max_move_score: f64,
    weight: f64,
) -> f64 {
    moves
        .iter()
        .map(|&m| weight - squared_distance(center, m) / max_move_score)
        .sum()
}

/// Knight-tour mobility of `moves` looking `depth` plies ahead.
///
/// Each level counts `|moves| * 65^depth`, then recurses into the knight
/// moves reachable from every move, never stepping straight back to `from`.
/// Only blocked cells on `state` are respected; the path itself is not.
pub fn lookahead_mobility<S: GameState>(
    state: &S,
    moves: &[Move],
    depth: u32,
    from: Option<Move>,
) -> f64 {
    let mut score = moves.len() as f64 * LOOKAHEAD_BASE.powi(depth as i32);
    if depth == 0 {
        return score;
    }

    for &m in moves {
        let mut next = knight_moves(state, m);
        if let Some(prev) = from {
            next.retain(|&c| c != prev);
        }
        score += lookahead_mobility(state, &next, depth - 1, Some(m));
    }

    score
}

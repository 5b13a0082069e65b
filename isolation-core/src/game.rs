//! Game-state interface consumed by the search

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Side identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A move is the destination cell of the side to move.
///
/// The same type doubles as a board location. `Move::NONE` (`(-1, -1)`)
/// is returned when no move is available or the search forfeits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    /// Sentinel for "no move available"
    pub const NONE: Move = Move::new(-1, -1);

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_none(&self) -> bool {
        *self == Move::NONE
    }

    /// Offset by (drow, dcol)
    pub fn offset(&self, drow: i32, dcol: i32) -> Move {
        Move::new(self.row + drow, self.col + dcol)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self {
        Move::new(row, col)
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Immutable snapshot of a two-player game as seen by the search.
///
/// Move lists must come back in a deterministic order: the search uses it
/// as branch order and for tie-breaking.
pub trait GameState: Sized {
    /// Side to move
    fn active_player(&self) -> Player;

    /// Legal moves for `player`, regardless of whose turn it is
    fn legal_moves_for(&self, player: Player) -> Vec<Move>;

    /// Legal moves for the side to move
    fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.active_player())
    }

    /// New state after the side to move plays `mv`; `self` is untouched.
    fn forecast_move(&self, mv: Move) -> Self;

    /// Current location of `player`, `None` before it has been placed
    fn location(&self, player: Player) -> Option<Move>;

    /// Board geometry as (width, height)
    fn dimensions(&self) -> (i32, i32);

    /// Whether `loc` is on the board and open
    fn move_is_legal(&self, loc: Move) -> bool;

    /// Exact game value for `player`: ±infinity once decided, 0 otherwise
    fn utility(&self, player: Player) -> f64 {
        crate::eval::terminal_utility(self, player)
    }
}

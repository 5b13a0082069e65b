//! Isolation board: two knights on a grid, visited cells become blocked

use crate::game::{GameState, Move, Player};
use rustc_hash::FxHashSet;

/// Knight-move offsets (drow, dcol), in generation order
pub const KNIGHT_DIRECTIONS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Default board size used by the match runner
pub const DEFAULT_SIZE: i32 = 7;

/// Knight moves reachable from `loc` on `state`, skipping illegal cells
pub fn knight_moves<S: GameState>(state: &S, loc: Move) -> Vec<Move> {
    KNIGHT_DIRECTIONS
        .iter()
        .map(|&(dr, dc)| loc.offset(dr, dc))
        .filter(|&dest| state.move_is_legal(dest))
        .collect()
}

/// Isolation game state (clone to fork)
#[derive(Clone, Debug)]
pub struct Board {
    width: i32,
    height: i32,

    /// Cells that can no longer be entered (visited or pre-blocked)
    blocked: FxHashSet<Move>,

    /// Player locations, `None` until the opening placement
    locations: [Option<Move>; 2],

    active: Player,

    /// Plies played so far
    pub move_count: u32,
}

impl Board {
    /// Empty board, `Player::One` to move, nobody placed
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocked: FxHashSet::default(),
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        }
    }

    /// Block the given cells before play starts
    pub fn with_blocked(mut self, cells: impl IntoIterator<Item = Move>) -> Self {
        self.blocked.extend(cells);
        self
    }

    /// Put both players on the board; `Player::One` stays to move
    pub fn with_positions(mut self, one: Move, two: Move) -> Self {
        self.place(Player::One, one);
        self.place(Player::Two, two);
        self
    }

    /// Pick the side to move
    pub fn with_active(mut self, player: Player) -> Self {
        self.active = player;
        self
    }

    fn place(&mut self, player: Player, loc: Move) {
        self.locations[player.index()] = Some(loc);
        self.blocked.insert(loc);
    }

    /// Play `mv` for the side to move in place.
    ///
    /// The caller is responsible for legality; the match runner checks it
    /// against `legal_moves` first.
    pub fn apply_move(&mut self, mv: Move) {
        self.place(self.active, mv);
        self.active = self.active.opponent();
        self.move_count += 1;
    }

    fn in_bounds(&self, loc: Move) -> bool {
        (0..self.height).contains(&loc.row) && (0..self.width).contains(&loc.col)
    }

    /// Open cells in row-major order
    pub fn open_cells(&self) -> Vec<Move> {
        let mut cells = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let loc = Move::new(row, col);
                if !self.blocked.contains(&loc) {
                    cells.push(loc);
                }
            }
        }
        cells
    }

    /// `player` is on the move and stuck
    pub fn is_loser(&self, player: Player) -> bool {
        self.active == player && self.legal_moves_for(player).is_empty()
    }

    /// The opponent of `player` is on the move and stuck
    pub fn is_winner(&self, player: Player) -> bool {
        self.is_loser(player.opponent())
    }

    /// Winner once the side to move has no legal moves
    pub fn winner(&self) -> Option<Player> {
        if self.is_loser(self.active) {
            Some(self.active.opponent())
        } else {
            None
        }
    }
}

impl GameState for Board {
    fn active_player(&self) -> Player {
        self.active
    }

    fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        match self.locations[player.index()] {
            Some(loc) => knight_moves(self, loc),
            // Opening placement: any open cell
            None => self.open_cells(),
        }
    }

    fn forecast_move(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.apply_move(mv);
        next
    }

    fn location(&self, player: Player) -> Option<Move> {
        self.locations[player.index()]
    }

    fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn move_is_legal(&self, loc: Move) -> bool {
        self.in_bounds(loc) && !self.blocked.contains(&loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_moves_are_open_cells() {
        let board = Board::new(3, 3).with_blocked([Move::new(1, 1)]);
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0], Move::new(0, 0));
        assert!(!moves.contains(&Move::new(1, 1)));
    }

    #[test]
    fn test_knight_moves_from_corner() {
        let board = Board::new(3, 3).with_positions(Move::new(0, 0), Move::new(2, 2));
        // (2, 1) and (1, 2) are the only in-bounds knight moves from (0, 0)
        assert_eq!(board.legal_moves(), vec![Move::new(1, 2), Move::new(2, 1)]);
    }

    #[test]
    fn test_forecast_does_not_mutate() {
        let board = Board::new(5, 5).with_positions(Move::new(0, 0), Move::new(4, 4));
        let next = board.forecast_move(Move::new(1, 2));

        assert_eq!(board.active_player(), Player::One);
        assert_eq!(board.location(Player::One), Some(Move::new(0, 0)));
        assert_eq!(board.move_count, 0);

        assert_eq!(next.active_player(), Player::Two);
        assert_eq!(next.location(Player::One), Some(Move::new(1, 2)));
        assert_eq!(next.move_count, 1);
    }

    #[test]
    fn test_visited_cells_are_blocked() {
        let board = Board::new(5, 5).with_positions(Move::new(0, 0), Move::new(4, 4));
        let next = board.forecast_move(Move::new(2, 1));
        assert!(!next.move_is_legal(Move::new(0, 0)));
        assert!(!next.move_is_legal(Move::new(2, 1)));
        assert!(!next.move_is_legal(Move::new(5, 0)));
        assert!(next.move_is_legal(Move::new(3, 3)));
    }

    #[test]
    fn test_winner_and_loser() {
        // Player one in the corner of a 3x3 with both escapes blocked
        let board = Board::new(3, 3)
            .with_blocked([Move::new(1, 2), Move::new(2, 1)])
            .with_positions(Move::new(0, 0), Move::new(1, 1));
        assert!(board.is_loser(Player::One));
        assert!(board.is_winner(Player::Two));
        assert_eq!(board.winner(), Some(Player::Two));
    }
}

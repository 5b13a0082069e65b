//! Game runner - executes single games
//!
//! Level 1-3 - Orchestration down to single turns

use isolation_core::{
    Agent, AlphaBetaAgent, Board, Countdown, GameState, MinimaxAgent, Move, Player,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{AgentConfig, AgentKind, MatchConfig, MatchError};
use crate::random::RandomAgent;

/// Seed used when an agent config leaves it unset
const DEFAULT_SEED: u64 = 42;

/// Why a player lost without being boxed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ForfeitReason {
    /// Returned the no-move sentinel while legal moves existed
    NoMove,
    /// Returned a move that is not legal
    IllegalMove { attempted: Move },
    /// Returned after the per-move time limit
    Timeout { elapsed_ms: u64 },
}

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "end")]
pub enum GameEnd {
    /// Side to move had no legal moves
    Isolated,
    Forfeit { reason: ForfeitReason },
    /// `max_moves` reached
    MoveLimit,
}

/// Outcome of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameOutcome {
    /// Winner (None when stopped at the move limit)
    pub winner: Option<Player>,
    /// Loser (None when stopped at the move limit)
    pub loser: Option<Player>,
    pub end: GameEnd,
    /// Move history, in play order
    pub moves: Vec<Move>,
}

impl GameOutcome {
    /// Check if the game was stopped without a result
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Plies played
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Build an agent from its config
pub fn create_agent(config: &AgentConfig) -> Result<Box<dyn Agent<Board>>, MatchError> {
    let agent: Box<dyn Agent<Board>> = match config.kind {
        AgentKind::Minimax => Box::new(MinimaxAgent::new(&config.search)?),
        AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::new(&config.search)?),
        AgentKind::Random => Box::new(RandomAgent::new(config.seed.unwrap_or(DEFAULT_SEED))),
    };
    Ok(agent)
}

/// Game runner that referees games between two agents
pub struct GameRunner {
    config: MatchConfig,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Empty board of the configured size
    pub fn initial_board(&self) -> Board {
        Board::new(self.config.width, self.config.height)
    }

    /// Play a game from the empty board; `first` moves first
    pub fn play(&self, first: &mut dyn Agent<Board>, second: &mut dyn Agent<Board>) -> GameOutcome {
        self.play_from(self.initial_board(), first, second)
    }

    /// Play a game from `board`; `first` plays `Player::One`
    pub fn play_from(
        &self,
        mut board: Board,
        first: &mut dyn Agent<Board>,
        second: &mut dyn Agent<Board>,
    ) -> GameOutcome {
        let mut moves = Vec::new();

        info!(
            "Starting game: {} vs {} on {}x{} ({} ms/move)",
            first.name(),
            second.name(),
            self.config.width,
            self.config.height,
            self.config.time_limit_ms
        );

        while (moves.len() as u32) < self.config.max_moves {
            let player = board.active_player();
            let agent: &mut dyn Agent<Board> = match player {
                Player::One => &mut *first,
                Player::Two => &mut *second,
            };

            let legal = board.legal_moves();
            if legal.is_empty() {
                info!("{:?} is isolated after {} plies", player, moves.len());
                return finish(Some(player.opponent()), GameEnd::Isolated, moves);
            }

            if let Err(reason) = self.take_turn(agent, &mut board, &legal, &mut moves) {
                warn!("{:?} ({}) forfeits: {:?}", player, agent.name(), reason);
                return finish(Some(player.opponent()), GameEnd::Forfeit { reason }, moves);
            }
        }

        info!("Move limit reached after {} plies", moves.len());
        GameOutcome {
            winner: None,
            loser: None,
            end: GameEnd::MoveLimit,
            moves,
        }
    }

    /// Ask `agent` for a move under the clock and apply it if it stands
    fn take_turn(
        &self,
        agent: &mut dyn Agent<Board>,
        board: &mut Board,
        legal: &[Move],
        moves: &mut Vec<Move>,
    ) -> Result<(), ForfeitReason> {
        let clock = Countdown::from_millis(self.config.time_limit_ms);
        let mv = agent.next_move(board, &clock);

        if clock.expired() {
            return Err(ForfeitReason::Timeout {
                elapsed_ms: clock.elapsed().as_millis() as u64,
            });
        }
        if mv.is_none() {
            return Err(ForfeitReason::NoMove);
        }
        if !legal.contains(&mv) {
            return Err(ForfeitReason::IllegalMove { attempted: mv });
        }

        info!("Ply {}: {:?} -> {}", moves.len() + 1, board.active_player(), mv);
        board.apply_move(mv);
        moves.push(mv);
        Ok(())
    }

    /// Get configuration
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}

fn finish(winner: Option<Player>, end: GameEnd, moves: Vec<Move>) -> GameOutcome {
    GameOutcome {
        winner,
        loser: winner.map(Player::opponent),
        end,
        moves,
    }
}

//! Minimax and iterative-deepening alpha-beta agents
//!
//! Both searches score every node from the perspective of the player to
//! move at the root. Every recursive entry point checks the deadline
//! before generating moves.

use crate::config::{ConfigError, SearchConfig};
use crate::deadline::{DeadlineGuard, SearchError, TimeLeft};
use crate::eval::{Evaluator, Heuristic};
use crate::game::{GameState, Move, Player};
use tracing::{debug, warn};

// ============================================================================
// AGENT INTERFACE
// ============================================================================

/// Anything that can pick a move under a time budget
pub trait Agent<S: GameState> {
    /// Pick a move for the side to move; `Move::NONE` forfeits.
    fn next_move(&mut self, state: &S, time_left: &dyn TimeLeft) -> Move;

    /// Short label for logs
    fn name(&self) -> String;
}

/// Outcome of an iterative-deepening search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchReport {
    /// Best move of the deepest completed iteration
    pub best_move: Move,
    /// Deepest fully completed iteration, 0 if none
    pub completed_depth: u32,
    /// Root value of that iteration
    pub score: f64,
    /// Nodes visited across all iterations
    pub nodes: u64,
    /// Whether the deadline ended the search
    pub timed_out: bool,
    /// Whether the last iteration searched the whole game tree
    pub exhausted: bool,
}

impl SearchReport {
    fn empty() -> Self {
        Self {
            best_move: Move::NONE,
            completed_depth: 0,
            score: f64::NEG_INFINITY,
            nodes: 0,
            timed_out: false,
            exhausted: false,
        }
    }
}

// ============================================================================
// MINIMAX
// ============================================================================

/// Fixed-depth minimax player
#[derive(Clone, Debug)]
pub struct MinimaxAgent<E = Heuristic> {
    pub search_depth: u32,
    pub timeout_ms: f64,
    evaluator: E,
}

impl MinimaxAgent<Heuristic> {
    /// Agent using the configured built-in heuristic
    pub fn new(config: &SearchConfig) -> Result<Self, ConfigError> {
        Self::with_evaluator(config, config.heuristic)
    }
}

impl<E> MinimaxAgent<E> {
    /// Agent using a custom evaluator; `config.heuristic` is ignored
    pub fn with_evaluator(config: &SearchConfig, evaluator: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            search_depth: config.search_depth,
            timeout_ms: config.timeout_ms,
            evaluator,
        })
    }

    /// Best move at the configured depth, or `Move::NONE` when there is
    /// none or the deadline hits first.
    pub fn choose_move<S>(&self, state: &S, time_left: &dyn TimeLeft) -> Move
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let guard = DeadlineGuard::new(time_left, self.timeout_ms);
        match self.minimax(state, self.search_depth, &guard) {
            Ok(mv) => mv,
            Err(SearchError::TimedOut) => {
                debug!(depth = self.search_depth, nodes = guard.nodes(), "minimax timed out, forfeiting");
                Move::NONE
            }
            Err(err) => {
                warn!(%err, "minimax aborted, forfeiting");
                Move::NONE
            }
        }
    }

    /// Depth-limited minimax decision.
    ///
    /// Ties go to the first move in generation order. `depth` must be at
    /// least 1.
    pub fn minimax<S>(&self, state: &S, depth: u32, guard: &DeadlineGuard) -> Result<Move, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        debug_assert!(depth >= 1, "minimax needs depth >= 1");
        guard.check()?;

        let moves = state.legal_moves();
        let Some(&first) = moves.first() else {
            return Ok(Move::NONE);
        };

        let player = state.active_player();
        let mut best_move = first;
        let mut best_score = f64::NEG_INFINITY;

        for mv in moves {
            let child = state.forecast_move(mv);
            let score = self.min_max_value(false, &child, depth.saturating_sub(1), player, guard)?;
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        Ok(best_move)
    }

    fn min_max_value<S>(
        &self,
        is_max: bool,
        state: &S,
        depth: u32,
        player: Player,
        guard: &DeadlineGuard,
    ) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        guard.check()?;

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Ok(state.utility(player));
        }

        if depth == 0 {
            guard.hit_horizon();
            return Ok(self.evaluator.score(state, player)?);
        }

        let mut value = if is_max { f64::NEG_INFINITY } else { f64::INFINITY };
        for mv in moves {
            let child = state.forecast_move(mv);
            let score = self.min_max_value(!is_max, &child, depth - 1, player, guard)?;
            value = if is_max { value.max(score) } else { value.min(score) };
        }

        Ok(value)
    }
}

impl<S, E> Agent<S> for MinimaxAgent<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn next_move(&mut self, state: &S, time_left: &dyn TimeLeft) -> Move {
        self.choose_move(state, time_left)
    }

    fn name(&self) -> String {
        format!("minimax(depth={})", self.search_depth)
    }
}

// ============================================================================
// ALPHA-BETA WITH ITERATIVE DEEPENING
// ============================================================================

/// Iterative-deepening alpha-beta player
#[derive(Clone, Debug)]
pub struct AlphaBetaAgent<E = Heuristic> {
    pub timeout_ms: f64,
    pub max_depth: Option<u32>,
    evaluator: E,
}

impl AlphaBetaAgent<Heuristic> {
    /// Agent using the configured built-in heuristic
    pub fn new(config: &SearchConfig) -> Result<Self, ConfigError> {
        Self::with_evaluator(config, config.heuristic)
    }
}

impl<E> AlphaBetaAgent<E> {
    /// Agent using a custom evaluator; `config.heuristic` is ignored
    pub fn with_evaluator(config: &SearchConfig, evaluator: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            timeout_ms: config.timeout_ms,
            max_depth: config.max_depth,
            evaluator,
        })
    }

    /// Best move of the deepest iteration that finished before the deadline
    pub fn choose_move<S>(&self, state: &S, time_left: &dyn TimeLeft) -> Move
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.search(state, time_left).best_move
    }

    /// Run iterative deepening until the deadline, `max_depth`, or an
    /// iteration that never reached the depth limit, keeping only fully
    /// completed iterations.
    ///
    /// A proven win does not stop the driver: deeper iterations may still
    /// move the choice to an earlier move with the same value.
    pub fn search<S>(&self, state: &S, time_left: &dyn TimeLeft) -> SearchReport
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let guard = DeadlineGuard::new(time_left, self.timeout_ms);
        let mut report = SearchReport::empty();
        let mut depth = 1;

        while self.max_depth.map_or(true, |max| depth <= max) {
            let horizon_before = guard.horizon_hits();
            match self.alphabeta(state, depth, &guard) {
                Ok((mv, score)) => {
                    report.best_move = mv;
                    report.completed_depth = depth;
                    report.score = score;
                    debug!(depth, best = %mv, score, nodes = guard.nodes(), "iteration complete");

                    // Every line ended in a terminal position, so deeper
                    // iterations would repeat this one exactly
                    if mv.is_none() || guard.horizon_hits() == horizon_before {
                        report.exhausted = true;
                        break;
                    }
                    depth += 1;
                }
                Err(SearchError::TimedOut) => {
                    report.timed_out = true;
                    debug!(
                        depth,
                        kept = report.completed_depth,
                        best = %report.best_move,
                        "deadline reached, keeping last completed iteration"
                    );
                    break;
                }
                Err(err) => {
                    warn!(%err, depth, "evaluation failed, keeping last completed iteration");
                    break;
                }
            }
        }

        report.nodes = guard.nodes();
        report
    }

    /// Alpha-beta decision at a fixed depth, with the root value.
    ///
    /// Returns `(Move::NONE, -inf)` when the side to move is stuck. `depth`
    /// must be at least 1.
    pub fn alphabeta<S>(
        &self,
        state: &S,
        depth: u32,
        guard: &DeadlineGuard,
    ) -> Result<(Move, f64), SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        debug_assert!(depth >= 1, "alphabeta needs depth >= 1");
        guard.check()?;

        let moves = state.legal_moves();
        let Some(&first) = moves.first() else {
            return Ok((Move::NONE, f64::NEG_INFINITY));
        };

        let player = state.active_player();
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut value = f64::NEG_INFINITY;
        let mut best_move = first;

        for mv in moves {
            let child = state.forecast_move(mv);
            let score =
                self.alphabeta_value(false, &child, depth.saturating_sub(1), alpha, beta, player, guard)?;
            value = value.max(score);
            if value >= beta {
                best_move = mv;
                break;
            }
            if value > alpha {
                alpha = value;
                best_move = mv;
            }
        }

        Ok((best_move, value))
    }

    #[allow(clippy::too_many_arguments)]
    fn alphabeta_value<S>(
        &self,
        is_max: bool,
        state: &S,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        player: Player,
        guard: &DeadlineGuard,
    ) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        guard.check()?;

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Ok(state.utility(player));
        }

        if depth == 0 {
            guard.hit_horizon();
            return Ok(self.evaluator.score(state, player)?);
        }

        if is_max {
            let mut value = f64::NEG_INFINITY;
            for mv in moves {
                let child = state.forecast_move(mv);
                value = value.max(self.alphabeta_value(false, &child, depth - 1, alpha, beta, player, guard)?);
                if value >= beta {
                    return Ok(value);
                }
                alpha = alpha.max(value);
            }
            Ok(value)
        } else {
            let mut value = f64::INFINITY;
            for mv in moves {
                let child = state.forecast_move(mv);
                value = value.min(self.alphabeta_value(true, &child, depth - 1, alpha, beta, player, guard)?);
                if value <= alpha {
                    return Ok(value);
                }
                beta = beta.min(value);
            }
            Ok(value)
        }
    }
}

impl<S, E> Agent<S> for AlphaBetaAgent<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn next_move(&mut self, state: &S, time_left: &dyn TimeLeft) -> Move {
        self.choose_move(state, time_left)
    }

    fn name(&self) -> String {
        match self.max_depth {
            Some(max) => format!("alphabeta(max_depth={max})"),
            None => "alphabeta".to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

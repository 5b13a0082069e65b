//! Integration tests for the search core
//!
//! Exercises the agents against the reference isolation board through the
//! public API only.

use isolation_core::{
    eval::{center_of, lookahead_mobility, terminal_utility, weighted_moves_score, CENTER_WEIGHT},
    AlphaBetaAgent, Board, DeadlineGuard, Evaluator, GameState, Heuristic, MinimaxAgent, Move,
    Player, ScoreFn, SearchConfig, TimeLeft,
};
use std::cell::Cell;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn plenty() -> f64 {
    1.0e9
}

/// Clock that reports plenty of time for a fixed number of reads, then none
struct CallBudget {
    remaining: Cell<u64>,
}

impl CallBudget {
    fn new(calls: u64) -> Self {
        Self {
            remaining: Cell::new(calls),
        }
    }
}

impl TimeLeft for CallBudget {
    fn millis_left(&self) -> f64 {
        let left = self.remaining.get();
        if left == 0 {
            return 0.0;
        }
        self.remaining.set(left - 1);
        1.0e9
    }
}

fn opening() -> Board {
    Board::new(5, 5).with_positions(Move::new(0, 0), Move::new(4, 4))
}

fn sample_positions() -> Vec<Board> {
    walk_games(opening())
}

/// Positions reached by walking games from `start` with a fixed move-picking stride
fn walk_games(start: Board) -> Vec<Board> {
    let mut positions = Vec::new();
    for stride in 0..5 {
        let mut board = start.clone();
        loop {
            let moves = board.legal_moves();
            if moves.is_empty() {
                positions.push(board);
                break;
            }
            positions.push(board.clone());
            let pick = (stride + board.move_count as usize) % moves.len();
            board.apply_move(moves[pick]);
        }
    }
    positions
}

// ============================================================================
// TERMINAL UTILITY
// ============================================================================

#[test]
fn test_stuck_side_to_move_loses_under_every_heuristic() {
    let board = Board::new(3, 3)
        .with_blocked([Move::new(1, 2), Move::new(2, 1)])
        .with_positions(Move::new(0, 0), Move::new(2, 2));
    assert!(board.legal_moves().is_empty());

    for heuristic in Heuristic::ALL {
        assert_eq!(heuristic.score(&board, Player::One), Ok(f64::NEG_INFINITY));
        assert_eq!(heuristic.score(&board, Player::Two), Ok(f64::INFINITY));
    }
    assert_eq!(board.utility(Player::One), f64::NEG_INFINITY);
    assert_eq!(board.utility(Player::Two), f64::INFINITY);
}

#[test]
fn test_opponent_stuck_on_its_turn_is_a_win() {
    // Player two in the corner with both exits blocked, and to move
    let board = Board::new(3, 3)
        .with_blocked([Move::new(1, 2), Move::new(2, 1)])
        .with_positions(Move::new(2, 2), Move::new(0, 0))
        .with_active(Player::Two);
    assert!(board.legal_moves().is_empty());
    assert_eq!(terminal_utility(&board, Player::One), f64::INFINITY);
}

#[test]
fn test_terminal_states_across_sampled_games() {
    for board in sample_positions() {
        let mover = board.active_player();
        if !board.legal_moves().is_empty() {
            continue;
        }
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.score(&board, mover), Ok(f64::NEG_INFINITY));
            assert_eq!(heuristic.score(&board, mover.opponent()), Ok(f64::INFINITY));
        }
    }
}

// ============================================================================
// HEURISTICS
// ============================================================================

#[test]
fn test_non_terminal_denominators_are_positive() {
    for board in sample_positions() {
        for player in [Player::One, Player::Two] {
            if terminal_utility(&board, player) != 0.0 {
                continue;
            }
            let own = board.legal_moves_for(player).len();
            let opp = board.legal_moves_for(player.opponent()).len();
            assert!(own + opp > 0);

            for heuristic in Heuristic::ALL {
                let score = heuristic.score(&board, player);
                assert!(matches!(score, Ok(s) if s.is_finite()), "{heuristic:?}: {score:?}");
            }
        }
    }
}

#[test]
fn test_ratio_heuristics_are_bounded() {
    for board in sample_positions() {
        let player = board.active_player();
        if terminal_utility(&board, player) != 0.0 {
            continue;
        }
        let score = Heuristic::MobilityRatio.score(&board, player).unwrap();
        assert!((-1.0..=1.0).contains(&score));
        let score = Heuristic::WeightedRatio.score(&board, player).unwrap();
        assert!((-1.0..=1.0).contains(&score));
    }
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn test_three_by_three_depth_one() {
    let board = Board::new(3, 3).with_positions(Move::new(0, 0), Move::new(0, 2));
    let legal = board.legal_moves();
    assert_eq!(legal, vec![Move::new(1, 2), Move::new(2, 1)]);

    for heuristic in Heuristic::ALL {
        let agent = MinimaxAgent::new(&SearchConfig::fixed_depth(1).with_heuristic(heuristic)).unwrap();
        let chosen = agent.choose_move(&board, &plenty);

        let value = |m: Move| {
            let child = board.forecast_move(m);
            if child.legal_moves().is_empty() {
                child.utility(Player::One)
            } else {
                heuristic.score(&child, Player::One).unwrap()
            }
        };
        let best = if value(legal[1]) > value(legal[0]) { legal[1] } else { legal[0] };
        assert_eq!(chosen, best, "{heuristic:?}");
    }
}

#[test]
fn test_alphabeta_matches_minimax_on_sampled_positions() {
    for board in sample_positions().into_iter().step_by(3) {
        for depth in 1..=3 {
            let config = SearchConfig::fixed_depth(depth);
            let minimax = MinimaxAgent::new(&config).unwrap();
            let alphabeta = AlphaBetaAgent::new(&config).unwrap();

            let guard = DeadlineGuard::new(&plenty, config.timeout_ms);
            let expected = minimax.minimax(&board, depth, &guard).unwrap();
            let guard = DeadlineGuard::new(&plenty, config.timeout_ms);
            let (actual, _) = alphabeta.alphabeta(&board, depth, &guard).unwrap();
            assert_eq!(actual, expected, "depth {depth} at move {}", board.move_count);
        }
    }
}

#[test]
fn test_iterative_deepening_keeps_last_completed_depth() {
    let board = opening();
    let agent = AlphaBetaAgent::new(&SearchConfig::default()).unwrap();

    for budget in [1, 3, 10, 40, 150, 600, 2_500, 10_000] {
        let clock = CallBudget::new(budget);
        let report = agent.search(&board, &clock);

        if report.completed_depth == 0 {
            assert_eq!(report.best_move, Move::NONE, "budget {budget}");
            assert!(report.timed_out);
            continue;
        }

        let minimax = MinimaxAgent::new(&SearchConfig::fixed_depth(report.completed_depth)).unwrap();
        assert_eq!(
            report.best_move,
            minimax.choose_move(&board, &plenty),
            "budget {budget}, depth {}",
            report.completed_depth
        );
    }
}

#[test]
fn test_iterative_deepening_matches_alphabeta_at_completed_depth() {
    // Narrow board where wins get proven several plies before the tree runs out
    let start = Board::new(4, 5).with_positions(Move::new(0, 0), Move::new(4, 3));
    for board in walk_games(start).into_iter().step_by(2) {
        for max in [4, 8, 10] {
            let agent = AlphaBetaAgent::new(&SearchConfig::default().with_max_depth(max)).unwrap();
            let report = agent.search(&board, &plenty);
            assert!(!report.timed_out);
            if !report.exhausted {
                assert_eq!(report.completed_depth, max);
            }
            if report.completed_depth == 0 {
                continue;
            }

            let guard = DeadlineGuard::new(&plenty, agent.timeout_ms);
            let (expected, score) = agent.alphabeta(&board, report.completed_depth, &guard).unwrap();
            assert_eq!(
                report.best_move, expected,
                "max depth {max} at move {} (score {score})",
                board.move_count
            );
        }
    }
}

#[test]
fn test_exhausted_search_ends_on_a_clock_that_never_runs_down() {
    let board = Board::new(4, 4).with_positions(Move::new(0, 0), Move::new(3, 3));
    let agent = AlphaBetaAgent::new(&SearchConfig::default()).unwrap();
    let report = agent.search(&board, &plenty);

    assert!(report.exhausted);
    assert!(!report.timed_out);
    assert!(report.completed_depth <= 14);
}

#[test]
fn test_deeper_budget_never_completes_fewer_iterations() {
    let board = opening();
    let agent = AlphaBetaAgent::new(&SearchConfig::default()).unwrap();

    let mut last_depth = 0;
    for budget in [10, 100, 1_000, 10_000] {
        let report = agent.search(&board, &CallBudget::new(budget));
        assert!(report.completed_depth >= last_depth);
        last_depth = report.completed_depth;
    }
}

#[test]
fn test_expired_clock_forfeits_without_panicking() {
    let board = opening();
    let expired = || -1.0;

    let minimax = MinimaxAgent::new(&SearchConfig::default()).unwrap();
    assert_eq!(minimax.choose_move(&board, &expired), Move::NONE);

    let alphabeta = AlphaBetaAgent::new(&SearchConfig::default()).unwrap();
    assert_eq!(alphabeta.choose_move(&board, &expired), Move::NONE);
}

#[test]
fn test_custom_evaluator() {
    let board = opening();
    let lookahead = ScoreFn(|state: &Board, player: Player| {
        let moves = state.legal_moves_for(player);
        lookahead_mobility(state, &moves, 1, None)
    });
    let agent = AlphaBetaAgent::with_evaluator(&SearchConfig::default().with_max_depth(3), lookahead).unwrap();
    let report = agent.search(&board, &plenty);
    assert!(board.legal_moves().contains(&report.best_move));
    assert!(report.nodes > 0);
}

#[test]
fn test_custom_evaluator_from_move_weights() {
    let board = opening();
    let centrality = ScoreFn(|state: &Board, player: Player| {
        let (center, max_move_score) = center_of(state);
        let own = weighted_moves_score(&state.legal_moves_for(player), center, max_move_score, CENTER_WEIGHT);
        let opp = weighted_moves_score(
            &state.legal_moves_for(player.opponent()),
            center,
            max_move_score,
            CENTER_WEIGHT,
        );
        own - opp
    });
    let agent = MinimaxAgent::with_evaluator(&SearchConfig::fixed_depth(2), centrality).unwrap();
    let mv = agent.choose_move(&board, &plenty);
    assert!(board.legal_moves().contains(&mv));
}

#[test]
fn test_invalid_config_fails_at_construction() {
    assert!(MinimaxAgent::new(&SearchConfig::fixed_depth(0)).is_err());
    assert!(AlphaBetaAgent::new(&SearchConfig::default().with_timeout(-5.0)).is_err());
}

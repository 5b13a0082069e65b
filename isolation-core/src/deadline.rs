//! Time budget and the cooperative deadline check

use crate::eval::ScoreError;
use std::cell::Cell;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Search abort reasons
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SearchError {
    /// Remaining time fell below the configured threshold
    #[error("search timed out")]
    TimedOut,
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Accessor for the remaining time of the current turn, in milliseconds.
///
/// Values may go negative once the turn is over.
pub trait TimeLeft {
    fn millis_left(&self) -> f64;
}

impl<F: Fn() -> f64> TimeLeft for F {
    fn millis_left(&self) -> f64 {
        self()
    }
}

/// Wall-clock budget started at construction
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    start: Instant,
    limit: Duration,
}

impl Countdown {
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn expired(&self) -> bool {
        self.millis_left() < 0.0
    }
}

impl TimeLeft for Countdown {
    fn millis_left(&self) -> f64 {
        (self.limit.as_secs_f64() - self.start.elapsed().as_secs_f64()) * 1000.0
    }
}

/// Checked on entry to every search call, before any move generation.
///
/// Also counts the calls it guards, which is the node count of the search,
/// and the leaves scored by the heuristic at the depth limit.
pub struct DeadlineGuard<'a> {
    time_left: &'a dyn TimeLeft,
    threshold_ms: f64,
    nodes: Cell<u64>,
    horizon: Cell<u64>,
}

impl<'a> DeadlineGuard<'a> {
    pub fn new(time_left: &'a dyn TimeLeft, threshold_ms: f64) -> Self {
        Self {
            time_left,
            threshold_ms,
            nodes: Cell::new(0),
            horizon: Cell::new(0),
        }
    }

    #[inline]
    pub fn check(&self) -> Result<(), SearchError> {
        if self.time_left.millis_left() < self.threshold_ms {
            return Err(SearchError::TimedOut);
        }
        self.nodes.set(self.nodes.get() + 1);
        Ok(())
    }

    /// Calls that passed the check so far
    pub fn nodes(&self) -> u64 {
        self.nodes.get()
    }

    /// Record a non-terminal leaf cut off by the depth limit
    #[inline]
    pub fn hit_horizon(&self) {
        self.horizon.set(self.horizon.get() + 1);
    }

    /// Depth-limit leaves recorded so far
    pub fn horizon_hits(&self) -> u64 {
        self.horizon.get()
    }
}

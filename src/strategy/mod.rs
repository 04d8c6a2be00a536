//! Move-selection strategies and their running accuracy.
//!
//! A [`Strategy`] proposes one move per position. Each instance owns its
//! [`StrategyStats`]; the harness updates them through
//! [`Strategy::record_outcome`] and nothing else writes to them.

use cozy_chess::Move;
use crate::board::cozy::Position;

pub mod minmax;
pub mod random;

pub use minmax::MinMaxStrategy;
pub use random::RandomStrategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyStats {
    attempts: u64,
    successes: u64,
}

impl StrategyStats {
    pub fn record(&mut self, correct: bool) {
        self.attempts += 1;
        if correct { self.successes += 1; }
    }

    pub fn attempts(&self) -> u64 { self.attempts }
    pub fn successes(&self) -> u64 { self.successes }

    /// `successes / attempts`, or `None` before the first attempt.
    pub fn success_rate(&self) -> Option<f64> {
        if self.attempts == 0 { return None; }
        Some(self.successes as f64 / self.attempts as f64)
    }
}

pub trait Strategy: Send {
    fn name(&self) -> &str;

    /// Move for the side to move in `pos`, or `None` when it has no legal move.
    fn select_move(&mut self, pos: &Position) -> Option<Move>;

    fn stats(&self) -> &StrategyStats;
    fn stats_mut(&mut self) -> &mut StrategyStats;

    fn record_outcome(&mut self, correct: bool) {
        self.stats_mut().record(correct);
    }
}

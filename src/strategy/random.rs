use cozy_chess::Move;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use crate::board::cozy::Position;
use crate::strategy::{Strategy, StrategyStats};

/// Uniform choice among the legal moves. Seeded once so that a benchmark run
/// can be repeated move for move.
pub struct RandomStrategy {
    name: String,
    rng: SmallRng,
    stats: StrategyStats,
}

impl RandomStrategy {
    pub fn with_seed(seed: u64) -> Self { Self::from_rng(SmallRng::seed_from_u64(seed)) }

    pub fn from_rng(rng: SmallRng) -> Self {
        Self { name: "random".to_string(), rng, stats: StrategyStats::default() }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str { &self.name }

    fn select_move(&mut self, pos: &Position) -> Option<Move> {
        let moves = pos.legal_moves();
        if moves.is_empty() { None } else { Some(moves[self.rng.gen_range(0..moves.len())]) }
    }

    fn stats(&self) -> &StrategyStats { &self.stats }
    fn stats_mut(&mut self) -> &mut StrategyStats { &mut self.stats }
}

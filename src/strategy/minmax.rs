use cozy_chess::Move;
use crate::board::cozy::Position;
use crate::search::eval::{Evaluator, MaterialBalance};
use crate::search::minimax::{SearchParams, SearchResult, Searcher};
use crate::strategy::{Strategy, StrategyStats};

pub struct MinMaxStrategy {
    name: String,
    params: SearchParams,
    evaluator: Box<dyn Evaluator>,
    stats: StrategyStats,
}

impl Default for MinMaxStrategy {
    fn default() -> Self { Self::new("minmax", SearchParams::default(), MaterialBalance) }
}

impl MinMaxStrategy {
    pub fn new<E: Evaluator + 'static>(name: &str, params: SearchParams, evaluator: E) -> Self {
        Self {
            name: name.to_string(),
            params,
            evaluator: Box::new(evaluator),
            stats: StrategyStats::default(),
        }
    }

    fn searcher(&self) -> Searcher<'_> { Searcher::new(self.evaluator.as_ref(), self.params) }

    /// Parameters the search actually runs with.
    pub fn params(&self) -> SearchParams { self.searcher().params() }

    pub fn evaluator(&self) -> &dyn Evaluator { self.evaluator.as_ref() }

    pub fn search(&self, pos: &Position) -> SearchResult { self.searcher().search(pos) }
}

impl Strategy for MinMaxStrategy {
    fn name(&self) -> &str { &self.name }

    fn select_move(&mut self, pos: &Position) -> Option<Move> {
        let res = self.search(pos);
        log::debug!(
            "{}: {} score={} nodes={}",
            self.name,
            res.bestmove.map(|m| pos.uci(m)).unwrap_or_else(|| "(none)".to_string()),
            res.score,
            res.nodes
        );
        res.bestmove
    }

    fn stats(&self) -> &StrategyStats { &self.stats }
    fn stats_mut(&mut self) -> &mut StrategyStats { &mut self.stats }
}

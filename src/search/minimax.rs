use cozy_chess::Move;
use rayon::prelude::*;
use crate::board::cozy::Position;
use crate::search::eval::Evaluator;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: 3, threads: 1 } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub bestmove: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

/// Fixed-depth minimax without pruning.
///
/// Every ply keeps the minimum score under the same perspective sign instead
/// of alternating max and min. Ties go to the move generated first.
pub struct Searcher<'a> {
    evaluator: &'a dyn Evaluator,
    params: SearchParams,
}

impl<'a> Searcher<'a> {
    /// Depth and thread count below one are raised to one.
    pub fn new(evaluator: &'a dyn Evaluator, params: SearchParams) -> Self {
        let params = SearchParams { depth: params.depth.max(1), threads: params.threads.max(1) };
        Self { evaluator, params }
    }

    pub fn params(&self) -> SearchParams { self.params }

    pub fn search(&self, root: &Position) -> SearchResult {
        if self.params.threads > 1 && self.params.depth > 1 {
            return self.search_parallel(root);
        }
        let mut nodes = 0u64;
        let (score, bestmove) = self.minimax(root, 1, root, 0, &mut nodes);
        SearchResult { bestmove, score, nodes }
    }

    // Root split: each child is searched as its own rayon task on the current
    // pool. Results come back in generation order, so the tie-break matches
    // the serial path.
    fn search_parallel(&self, root: &Position) -> SearchResult {
        let moves = root.legal_moves();
        let results: Vec<(Move, i32, u64)> = moves
            .par_iter()
            .map(|&m| {
                let child = root.apply(m);
                let mut n = 0u64;
                let (score, _) = self.minimax(&child, 1, root, 1, &mut n);
                log::trace!("root {} -> {}", root.uci(m), score);
                (m, score, n)
            })
            .collect();
        let nodes = 1 + results.iter().map(|&(_, _, n)| n).sum::<u64>();
        let scored: Vec<(i32, Move)> = results.into_iter().map(|(m, s, _)| (s, m)).collect();
        match select_min(&scored) {
            Some((score, best)) => SearchResult { bestmove: Some(best), score, nodes },
            None => {
                let score = self.evaluator.evaluate(root, root, 1);
                SearchResult { bestmove: None, score, nodes }
            }
        }
    }

    fn minimax(
        &self,
        pos: &Position,
        perspective: i32,
        reference: &Position,
        depth: u32,
        nodes: &mut u64,
    ) -> (i32, Option<Move>) {
        *nodes += 1;
        if depth >= self.params.depth {
            return (self.evaluator.evaluate(pos, reference, perspective), None);
        }
        let moves = pos.legal_moves();
        let mut scored: Vec<(i32, Move)> = Vec::with_capacity(moves.len());
        for m in moves {
            let child = pos.apply(m);
            let (score, _) = self.minimax(&child, perspective, reference, depth + 1, nodes);
            if depth == 0 { log::trace!("root {} -> {}", pos.uci(m), score); }
            scored.push((score, m));
        }
        match select_min(&scored) {
            Some((score, best)) => (score, Some(best)),
            // checkmate or stalemate
            None => (self.evaluator.evaluate(pos, reference, perspective), None),
        }
    }
}

// First entry with the lowest score, or None for an empty list.
fn select_min(scored: &[(i32, Move)]) -> Option<(i32, Move)> {
    let mut best: Option<(i32, Move)> = None;
    for &(s, m) in scored {
        if best.map_or(true, |(bs, _)| s < bs) { best = Some((s, m)); }
    }
    best
}

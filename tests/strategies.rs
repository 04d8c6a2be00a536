use puzzlebench::search::eval::{MaterialBalance, MaterialDifferential};
use puzzlebench::search::minimax::SearchParams;
use puzzlebench::strategy::{MinMaxStrategy, RandomStrategy, Strategy, StrategyStats};
use puzzlebench::Position;

fn moves_from(strategy: &mut dyn Strategy, pos: &Position, n: usize) -> Vec<String> {
    (0..n).map(|_| strategy.select_move(pos).map(|m| pos.uci(m)).expect("legal move")).collect()
}

#[test]
fn random_is_deterministic_by_seed() {
    let pos = Position::startpos();
    let a = moves_from(&mut RandomStrategy::with_seed(42), &pos, 16);
    let b = moves_from(&mut RandomStrategy::with_seed(42), &pos, 16);
    assert_eq!(a, b);
}

#[test]
fn random_seed_changes_sequence() {
    let pos = Position::startpos();
    let a = moves_from(&mut RandomStrategy::with_seed(1), &pos, 16);
    let b = moves_from(&mut RandomStrategy::with_seed(2), &pos, 16);
    assert_ne!(a, b, "different seeds produced identical sequences");
}

#[test]
fn random_returns_legal_move() {
    let pos = Position::from_start_and_moves(&["e2e4", "e7e5"]).expect("legal line");
    let mut s = RandomStrategy::with_seed(7);
    for _ in 0..32 {
        let mv = s.select_move(&pos).expect("a legal move exists");
        assert!(pos.legal_moves().contains(&mv));
    }
}

#[test]
fn random_handles_terminal_positions() {
    let mut s = RandomStrategy::with_seed(7);
    let mated = Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
        .expect("valid fen");
    let stalemate = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").expect("valid fen");
    assert!(s.select_move(&mated).is_none());
    assert!(s.select_move(&stalemate).is_none());
}

#[test]
fn minmax_defaults() {
    let s = MinMaxStrategy::default();
    assert_eq!(s.name(), "minmax");
    assert_eq!(s.params().depth, 3);
    assert_eq!(s.evaluator().name(), "balance");
}

#[test]
fn minmax_reports_clamped_params() {
    let pos = Position::startpos();
    let mut s =
        MinMaxStrategy::new("shallow", SearchParams { depth: 0, threads: 0 }, MaterialBalance);
    assert_eq!(s.params().depth, 1);
    assert_eq!(s.params().threads, 1);
    assert_eq!(s.search(&pos).nodes, 1 + 20);
    assert!(s.select_move(&pos).is_some());
}

#[test]
fn minmax_strategy_plays_search_move() {
    let pos = Position::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").expect("valid fen");
    let mut s =
        MinMaxStrategy::new("minmax_diff", SearchParams { depth: 1, threads: 1 }, MaterialDifferential);
    let mv = s.select_move(&pos).expect("a move");
    assert_eq!(pos.uci(mv), "e2d2");
    assert_eq!(s.search(&pos).bestmove, Some(mv));
}

#[test]
fn stats_track_each_outcome() {
    let mut st = StrategyStats::default();
    assert_eq!(st.success_rate(), None);
    let pattern = [true, false, true, true, false];
    let mut hits = 0u64;
    for (i, &ok) in pattern.iter().enumerate() {
        st.record(ok);
        if ok { hits += 1; }
        let n = i as u64 + 1;
        assert_eq!(st.attempts(), n);
        assert_eq!(st.successes(), hits);
        assert_eq!(st.success_rate(), Some(hits as f64 / n as f64));
    }
}

#[test]
fn record_outcome_updates_own_stats_only() {
    let mut a = MinMaxStrategy::new("a", SearchParams::default(), MaterialBalance);
    let mut b = RandomStrategy::with_seed(3);
    a.record_outcome(true);
    a.record_outcome(false);
    b.record_outcome(false);
    assert_eq!((a.stats().successes(), a.stats().attempts()), (1, 2));
    assert_eq!((b.stats().successes(), b.stats().attempts()), (0, 1));
}

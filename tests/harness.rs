use pretty_assertions::assert_eq;
use cozy_chess::Move;
use puzzlebench::harness::{Harness, Reporter, Snapshot, StrategyLine};
use puzzlebench::puzzle::CsvPuzzleReader;
use puzzlebench::strategy::{Strategy, StrategyStats};
use puzzlebench::{Position, PuzzleError};
use std::io::Cursor;

const HEADER: &str = "PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags";
const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Plays a fixed list of answers, one per call.
struct Scripted {
    name: String,
    answers: Vec<Option<&'static str>>,
    next: usize,
    stats: StrategyStats,
}

impl Scripted {
    fn new(name: &str, answers: &[Option<&'static str>]) -> Self {
        Self { name: name.to_string(), answers: answers.to_vec(), next: 0, stats: StrategyStats::default() }
    }
}

impl Strategy for Scripted {
    fn name(&self) -> &str { &self.name }
    fn select_move(&mut self, pos: &Position) -> Option<Move> {
        let ans = self.answers[self.next];
        self.next += 1;
        ans.and_then(|u| pos.find_move(u))
    }
    fn stats(&self) -> &StrategyStats { &self.stats }
    fn stats_mut(&mut self) -> &mut StrategyStats { &mut self.stats }
}

fn startpos_puzzles(n: usize) -> String {
    let mut text = format!("{}\n", HEADER);
    for i in 0..n {
        text.push_str(&format!("p{},{},e2e4 e7e5,1500,80,90,100,opening,https://lichess.org/x,\n", i, START_FEN));
    }
    text
}

fn line(name: &str, successes: u64, attempts: u64) -> StrategyLine {
    let mut stats = StrategyStats::default();
    for i in 0..attempts { stats.record(i < successes); }
    StrategyLine::new(name, stats)
}

#[test]
fn reports_after_hits_and_once_at_the_end() {
    let mut h = Harness::new();
    h.add_strategy(Scripted::new("a", &[Some("e2e4"), Some("d2d4"), Some("e2e4"), Some("d2d4")]));
    h.add_strategy(Scripted::new("b", &[Some("d2d4"), Some("d2d4"), Some("d2d4"), Some("e2e4")]));

    let records = CsvPuzzleReader::new(Cursor::new(startpos_puzzles(4))).unwrap();
    let mut reports: Vec<Snapshot> = Vec::new();
    let summary = h.run_all(records, &mut reports).unwrap();

    assert_eq!(summary.puzzles, 4);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.reports, 4);
    let expected = vec![
        Snapshot { lines: vec![line("a", 1, 1), line("b", 0, 1)] },
        Snapshot { lines: vec![line("a", 2, 3), line("b", 0, 3)] },
        Snapshot { lines: vec![line("a", 2, 4), line("b", 1, 4)] },
        Snapshot { lines: vec![line("a", 2, 4), line("b", 1, 4)] },
    ];
    assert_eq!(reports, expected);
    assert_eq!(reports[1].to_string(), "a: 2/3 (66.7%) | b: 0/3 (0.0%)");
}

#[test]
fn only_final_report_without_hits() {
    let mut h = Harness::new();
    h.add_strategy(Scripted::new("miss", &[Some("d2d4"), None, Some("g1f3")]));
    let records = CsvPuzzleReader::new(Cursor::new(startpos_puzzles(3))).unwrap();
    let mut reports: Vec<Snapshot> = Vec::new();
    let summary = h.run_all(records, &mut reports).unwrap();
    assert_eq!(summary.reports, 1);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].to_string(), "miss: 0/3 (0.0%)");
}

#[test]
fn final_report_on_empty_source() {
    let mut h = Harness::new();
    h.add_strategy(Scripted::new("idle", &[]));
    let records = CsvPuzzleReader::new(Cursor::new(format!("{}\n", HEADER))).unwrap();
    let mut reports: Vec<Snapshot> = Vec::new();
    let summary = h.run_all(records, &mut reports).unwrap();
    assert_eq!(summary.puzzles, 0);
    // Strategies without attempts are left out of the snapshot.
    assert_eq!(reports, vec![Snapshot::default()]);
    assert_eq!(reports[0].to_string(), "");
}

#[test]
fn no_move_counts_as_miss() {
    let mut h = Harness::new();
    h.add_strategy(Scripted::new("silent", &[None]));
    let hit = h.evaluate_puzzle(&Position::startpos(), "e2e4");
    assert!(!hit);
    let st = h.strategies()[0].stats();
    assert_eq!((st.successes(), st.attempts()), (0, 1));
}

#[test]
fn malformed_records_are_skipped() {
    let text = format!(
        "{}\nok1,{},e2e4,1,1,1,1,t,u,\nbad,{},e2e5,1,1,1,1,t,u,\nshort,line\nok2,{},e2e4,1,1,1,1,t,u,\n",
        HEADER, START_FEN, START_FEN, START_FEN
    );
    let mut h = Harness::new();
    h.add_strategy(Scripted::new("a", &[Some("e2e4"), Some("e2e4")]));
    let mut reports: Vec<Snapshot> = Vec::new();
    let summary = h.run_all(CsvPuzzleReader::new(Cursor::new(text)).unwrap(), &mut reports)
        .unwrap();
    assert_eq!(summary.puzzles, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(h.strategies()[0].stats().attempts(), 2);
    assert_eq!(reports.last().map(|s| s.to_string()), Some("a: 2/2 (100.0%)".to_string()));
}

#[test]
fn source_errors_stop_the_run() {
    let mut h = Harness::new();
    h.add_strategy(Scripted::new("a", &[]));
    let records = vec![Err(PuzzleError::MissingHeader)];
    let mut reports: Vec<Snapshot> = Vec::new();
    assert!(matches!(h.run_all(records, &mut reports), Err(PuzzleError::MissingHeader)));
    assert!(reports.is_empty());
}

#[derive(Default)]
struct Counting { done: Vec<(usize, bool)>, reports: usize }

impl Reporter for Counting {
    fn report(&mut self, _snapshot: &Snapshot) { self.reports += 1; }
    fn puzzle_done(&mut self, index: usize, hit: bool) { self.done.push((index, hit)); }
}

#[test]
fn reporter_sees_every_puzzle() {
    let mut h = Harness::new();
    h.add_strategy(Scripted::new("a", &[Some("d2d4"), Some("e2e4")]));
    let mut rep = Counting::default();
    h.run_all(CsvPuzzleReader::new(Cursor::new(startpos_puzzles(2))).unwrap(), &mut rep).unwrap();
    assert_eq!(rep.done, vec![(0, false), (1, true)]);
    assert_eq!(rep.reports, 2);
}

#[test]
fn strategy_line_formats_rate() {
    assert_eq!(line("a", 2, 3).to_string(), "a: 2/3 (66.7%)");
    assert_eq!(line("b", 0, 1).to_string(), "b: 0/1 (0.0%)");
    // Never produced by a snapshot, but must not print NaN.
    let untried = StrategyLine::new("c", StrategyStats::default());
    assert_eq!(untried.to_string(), "c: 0/0 (-)");
    assert_eq!(untried.stats().attempts(), 0);
    assert_eq!(untried.name(), "c");
}

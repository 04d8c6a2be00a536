//! Runs registered strategies over a stream of puzzles.
//!
//! After each puzzle on which at least one strategy found the expected move,
//! a [`Snapshot`] of every strategy's running accuracy is handed to the
//! [`Reporter`]. One final snapshot is always reported after the last
//! puzzle, whatever happened on it.

use std::fmt;
use crate::board::cozy::Position;
use crate::error::PuzzleError;
use crate::puzzle::PuzzleRecord;
use crate::strategy::{Strategy, StrategyStats};

/// One strategy's running accuracy, as printed in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyLine {
    name: String,
    stats: StrategyStats,
}

impl StrategyLine {
    pub fn new(name: &str, stats: StrategyStats) -> Self {
        Self { name: name.to_string(), stats }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn stats(&self) -> StrategyStats { self.stats }
}

impl fmt::Display for StrategyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.stats.successes(), self.stats.attempts())?;
        match self.stats.success_rate() {
            Some(rate) => write!(f, " ({:.1}%)", rate * 100.0),
            None => f.write_str(" (-)"),
        }
    }
}

/// Accuracy of every strategy that has been tried at least once, in
/// registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub lines: Vec<StrategyLine>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 { f.write_str(" | ")?; }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub trait Reporter {
    fn report(&mut self, snapshot: &Snapshot);

    /// Called once per evaluated puzzle, before any report for it.
    fn puzzle_done(&mut self, _index: usize, _hit: bool) {}
}

/// Prints each snapshot on its own line.
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&mut self, snapshot: &Snapshot) { println!("{}", snapshot); }
}

impl Reporter for Vec<Snapshot> {
    fn report(&mut self, snapshot: &Snapshot) { self.push(snapshot.clone()); }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub puzzles: usize,
    pub skipped: usize,
    pub reports: usize,
}

#[derive(Default)]
pub struct Harness {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Harness {
    pub fn new() -> Self { Self::default() }

    pub fn add_strategy<S: Strategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Box::new(strategy));
    }

    pub fn strategies(&self) -> &[Box<dyn Strategy>] { &self.strategies }

    pub fn snapshot(&self) -> Snapshot {
        let lines = self.strategies.iter()
            .filter(|s| s.stats().attempts() > 0)
            .map(|s| StrategyLine::new(s.name(), *s.stats()))
            .collect();
        Snapshot { lines }
    }

    /// Ask every strategy for a move and record whether it matched
    /// `expected`. A strategy with no move counts as a miss. Returns true if
    /// any strategy matched.
    pub fn evaluate_puzzle(&mut self, pos: &Position, expected: &str) -> bool {
        let mut any_hit = false;
        for strategy in self.strategies.iter_mut() {
            let actual = strategy.select_move(pos).map(|m| pos.uci(m));
            let correct = actual.as_deref() == Some(expected);
            log::debug!(
                "{}: played {} expected {}{}",
                strategy.name(),
                actual.as_deref().unwrap_or("(none)"),
                expected,
                if correct { " (hit)" } else { "" }
            );
            strategy.record_outcome(correct);
            any_hit |= correct;
        }
        any_hit
    }

    /// Evaluate every record of `records`.
    ///
    /// Records that fail to decode are logged and skipped; any other error
    /// (I/O, unusable header) stops the run.
    pub fn run_all<I, R>(
        &mut self,
        records: I,
        reporter: &mut R,
    ) -> Result<RunSummary, PuzzleError>
    where
        I: IntoIterator<Item = Result<PuzzleRecord, PuzzleError>>,
        R: Reporter + ?Sized,
    {
        let mut summary = RunSummary::default();
        for rec in records {
            let rec = match rec {
                Ok(r) => r,
                Err(e) if e.is_record_error() => {
                    log::warn!("skipping puzzle: {}", e);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            let Some(expected) = rec.expected_move() else {
                log::warn!("skipping puzzle {}: no solution moves", rec.id);
                summary.skipped += 1;
                continue;
            };
            log::debug!("puzzle {} ({})", rec.id, rec.position.fen());
            let hit = self.evaluate_puzzle(&rec.position, expected);
            reporter.puzzle_done(summary.puzzles, hit);
            summary.puzzles += 1;
            if hit {
                reporter.report(&self.snapshot());
                summary.reports += 1;
            }
        }
        reporter.report(&self.snapshot());
        summary.reports += 1;
        Ok(summary)
    }
}

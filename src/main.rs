use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use puzzlebench::dataset::{dataset_path, parse_sample_size, DOWNLOAD_HINT};
use puzzlebench::harness::{Harness, Reporter, Snapshot};
use puzzlebench::puzzle::PuzzleFile;
use puzzlebench::search::eval::{MaterialBalance, MaterialDifferential};
use puzzlebench::search::minimax::SearchParams;
use puzzlebench::strategy::{MinMaxStrategy, RandomStrategy};
use std::time::Duration;

const SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(
    name = "puzzlebench",
    version,
    about = "Score move-selection strategies on the Lichess puzzle dataset"
)]
struct Args {
    /// Number of puzzles to use (50 or 500). Defaults to the full dataset.
    #[arg(short, long, value_parser = parse_sample_size)]
    num: Option<u32>,
}

// Prints snapshots above a spinner that counts evaluated puzzles.
struct ProgressReporter {
    pb: ProgressBar,
    hits: u64,
}

impl Reporter for ProgressReporter {
    fn report(&mut self, snapshot: &Snapshot) { self.pb.suspend(|| println!("{}", snapshot)); }

    fn puzzle_done(&mut self, _index: usize, hit: bool) {
        if hit { self.hits += 1; }
        self.pb.set_message(format!("{} with a hit", self.hits));
        self.pb.inc(1);
    }
}

fn search_threads() -> usize {
    std::env::var("PUZZLEBENCH_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let path = dataset_path(args.num);
    if !path.is_file() {
        eprintln!("Error: The dataset file '{}' is missing.", path.display());
        eprintln!("{}", DOWNLOAD_HINT);
        std::process::exit(1);
    }
    let file = PuzzleFile::new(&path)?;

    let threads = search_threads();
    if threads > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("building search thread pool")?;
    }
    let params = SearchParams { depth: 3, threads };

    let mut harness = Harness::new();
    harness.add_strategy(RandomStrategy::with_seed(SEED));
    harness.add_strategy(MinMaxStrategy::new("minmax_balance", params, MaterialBalance));
    harness.add_strategy(MinMaxStrategy::new("minmax_diff", params, MaterialDifferential));

    log::info!(
        "evaluating {} with {} strategies (depth {}, threads {})",
        file.path().display(),
        harness.strategies().len(),
        params.depth,
        threads
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "{spinner} {pos} puzzles, {msg} [{elapsed_precise}]",
    )?);
    pb.enable_steady_tick(Duration::from_millis(200));
    let mut reporter = ProgressReporter { pb, hits: 0 };

    let records = file
        .records()
        .with_context(|| format!("opening {}", file.path().display()))?;
    let summary = harness.run_all(records, &mut reporter)?;
    reporter.pb.finish_and_clear();

    log::info!(
        "done: {} puzzles, {} skipped, {} reports",
        summary.puzzles,
        summary.skipped,
        summary.reports
    );
    Ok(())
}

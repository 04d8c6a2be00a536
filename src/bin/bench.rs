use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use puzzlebench::search::eval::{Evaluator, MaterialBalance, MaterialDifferential};
use puzzlebench::search::minimax::{SearchParams, Searcher};
use puzzlebench::Position;
use std::time::Instant;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EvalKind { Balance, Diff }

#[derive(Parser, Debug)]
#[command(name = "puzzlebench-bench", version, about = "Time a single fixed-depth minimax search")]
struct Args {
    /// FEN string or 'startpos'
    #[arg(long, default_value = "startpos")]
    fen: String,

    /// Search depth in plies
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Static evaluator used at the leaves
    #[arg(long, value_enum, default_value_t = EvalKind::Balance)]
    eval: EvalKind,

    /// Threads for the root split
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let pos = if args.fen == "startpos" {
        Position::startpos()
    } else {
        Position::from_fen(&args.fen).context("parsing --fen")?
    };

    let evaluator: Box<dyn Evaluator> = match args.eval {
        EvalKind::Balance => Box::new(MaterialBalance),
        EvalKind::Diff => Box::new(MaterialDifferential),
    };
    let params = SearchParams { depth: args.depth, threads: args.threads.max(1) };
    let searcher = Searcher::new(evaluator.as_ref(), params);

    let t0 = Instant::now();
    let res = if params.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.threads)
            .build()
            .context("building thread pool")?;
        pool.install(|| searcher.search(&pos))
    } else {
        searcher.search(&pos)
    };
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    let best = res.bestmove.map(|m| pos.uci(m)).unwrap_or_else(|| "(none)".to_string());
    println!(
        "bestmove={} eval={} score={} nodes={} elapsed={:.3}s nps={:.1}",
        best,
        evaluator.name(),
        res.score,
        res.nodes,
        dt.as_secs_f64(),
        nps
    );
    Ok(())
}

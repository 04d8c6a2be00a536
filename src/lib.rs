// Strategy benchmark over chess puzzles: fixed-depth minimax and random
// baselines scored against Lichess puzzle solutions.
pub mod board;
pub mod dataset;
pub mod error;
pub mod harness;
pub mod puzzle;
pub mod search;
pub mod strategy;

pub use board::cozy::Position;
pub use error::{BoardError, PuzzleError};

//! Error types for board handling and puzzle decoding.

use thiserror::Error;

/// Errors raised while building or advancing a [`Position`](crate::board::cozy::Position).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("illegal move '{uci}' in position {fen}")]
    IllegalMove { uci: String, fen: String },
}

/// Errors raised while reading a puzzle source.
///
/// Record-level variants carry the 1-based line number of the offending
/// line so that a skipped record can be located in the input file.
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognised puzzle file extension: {}", .0.display())]
    UnknownFormat(std::path::PathBuf),

    #[error("puzzle source has no header line")]
    MissingHeader,

    #[error("header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount { line: usize, expected: usize, found: usize },

    #[error("line {line}: {source}")]
    Board {
        line: usize,
        #[source]
        source: BoardError,
    },

    #[error("line {line}: puzzle has no solution moves")]
    NoMoves { line: usize },

    #[error("line {line}: malformed suite entry: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl PuzzleError {
    /// Whether the error concerns a single record (and the run may carry on
    /// with the next one) rather than the source as a whole.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            PuzzleError::ColumnCount { .. }
                | PuzzleError::Board { .. }
                | PuzzleError::NoMoves { .. }
                | PuzzleError::Json { .. }
        )
    }
}

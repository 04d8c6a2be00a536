//! Puzzle sources.
//!
//! The Lichess puzzle database is a comma-separated file whose first line
//! names the columns:
//!
//! ```text
//! PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags
//! ```
//!
//! Columns are looked up by name from that header, so a reordered export
//! still decodes correctly. FENs contain spaces but never commas, and moves
//! are space-separated UCI, which keeps a plain split sufficient.
//!
//! Mate suites use one JSON object per line, `{"fen":"...","best":"e2e4"}`,
//! and are read by [`JsonlSuiteReader`].

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::board::cozy::Position;
use crate::error::{BoardError, PuzzleError};

pub const HEADERS: [&str; 10] = [
    "PuzzleId", "FEN", "Moves", "Rating", "RatingDeviation",
    "Popularity", "NbPlays", "Themes", "GameUrl", "OpeningTags",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRecord {
    pub id: String,
    pub position: Position,
    /// Solution line in UCI, starting with the move expected from `position`.
    pub moves: Vec<String>,
    pub rating: Option<u32>,
    pub rating_deviation: Option<u32>,
    pub popularity: Option<i32>,
    pub nb_plays: Option<u64>,
    pub themes: Vec<String>,
    pub game_url: Option<String>,
    pub opening_tags: Vec<String>,
}

impl PuzzleRecord {
    fn bare(id: String, position: Position, moves: Vec<String>) -> Self {
        Self {
            id, position, moves,
            rating: None, rating_deviation: None, popularity: None, nb_plays: None,
            themes: Vec::new(), game_url: None, opening_tags: Vec::new(),
        }
    }

    pub fn expected_move(&self) -> Option<&str> { self.moves.first().map(String::as_str) }
}

/// Column indices resolved from a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleColumns {
    width: usize,
    id: usize,
    fen: usize,
    moves: usize,
    rating: Option<usize>,
    rating_deviation: Option<usize>,
    popularity: Option<usize>,
    nb_plays: Option<usize>,
    themes: Option<usize>,
    game_url: Option<usize>,
    opening_tags: Option<usize>,
}

impl Default for PuzzleColumns {
    fn default() -> Self {
        Self {
            width: HEADERS.len(),
            id: 0, fen: 1, moves: 2,
            rating: Some(3), rating_deviation: Some(4), popularity: Some(5), nb_plays: Some(6),
            themes: Some(7), game_url: Some(8), opening_tags: Some(9),
        }
    }
}

impl PuzzleColumns {
    pub fn from_header(line: &str) -> Result<Self, PuzzleError> {
        let line = line.trim().trim_start_matches('\u{feff}');
        let names: Vec<&str> = line.split(',').map(str::trim).collect();
        Self::resolve(&names)
    }

    fn resolve(names: &[&str]) -> Result<Self, PuzzleError> {
        let find = |key: &str| names.iter().position(|n| n.eq_ignore_ascii_case(key));
        let need = |key: &'static str| find(key).ok_or(PuzzleError::MissingColumn(key));
        Ok(Self {
            width: names.len(),
            id: need("PuzzleId")?,
            fen: need("FEN")?,
            moves: need("Moves")?,
            rating: find("Rating"),
            rating_deviation: find("RatingDeviation"),
            popularity: find("Popularity"),
            nb_plays: find("NbPlays"),
            themes: find("Themes"),
            game_url: find("GameUrl"),
            opening_tags: find("OpeningTags"),
        })
    }

    pub fn width(&self) -> usize { self.width }

    /// Decode one data line. `line_no` is 1-based and only used in errors.
    ///
    /// The whole solution line is replayed from the FEN, so a record whose
    /// moves do not fit its position is rejected here.
    pub fn decode_record(&self, line: &str, line_no: usize) -> Result<PuzzleRecord, PuzzleError> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != self.width {
            return Err(PuzzleError::ColumnCount {
                line: line_no,
                expected: self.width,
                found: fields.len(),
            });
        }
        let board_err = |source: BoardError| PuzzleError::Board { line: line_no, source };

        let position = Position::from_fen(fields[self.fen]).map_err(board_err)?;
        let moves: Vec<String> =
            fields[self.moves].split_whitespace().map(str::to_string).collect();
        if moves.is_empty() { return Err(PuzzleError::NoMoves { line: line_no }); }
        let mut replay = position.clone();
        for m in &moves { replay.play_uci(m).map_err(board_err)?; }

        let text = |idx: Option<usize>| idx.map(|i| fields[i].trim()).filter(|s| !s.is_empty());
        let words = |idx: Option<usize>| {
            text(idx)
                .map(|s| s.split_whitespace().map(str::to_string).collect::<Vec<String>>())
                .unwrap_or_default()
        };

        let mut rec = PuzzleRecord::bare(fields[self.id].trim().to_string(), position, moves);
        rec.rating = text(self.rating).and_then(|s| s.parse().ok());
        rec.rating_deviation = text(self.rating_deviation).and_then(|s| s.parse().ok());
        rec.popularity = text(self.popularity).and_then(|s| s.parse().ok());
        rec.nb_plays = text(self.nb_plays).and_then(|s| s.parse().ok());
        rec.themes = words(self.themes);
        rec.game_url = text(self.game_url).map(str::to_string);
        rec.opening_tags = words(self.opening_tags);
        Ok(rec)
    }
}

/// Lichess CSV reader. Construction consumes the header line.
pub struct CsvPuzzleReader<R: BufRead> {
    lines: Lines<R>,
    columns: PuzzleColumns,
    line_no: usize,
}

impl<R: BufRead> CsvPuzzleReader<R> {
    pub fn new(reader: R) -> Result<Self, PuzzleError> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or(PuzzleError::MissingHeader)??;
        let columns = PuzzleColumns::from_header(&header)?;
        Ok(Self { lines, columns, line_no: 1 })
    }

    pub fn columns(&self) -> &PuzzleColumns { &self.columns }
}

impl<R: BufRead> Iterator for CsvPuzzleReader<R> {
    type Item = Result<PuzzleRecord, PuzzleError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() { continue; }
            return Some(self.columns.decode_record(&line, self.line_no));
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuiteEntry {
    fen: String,
    best: String,
}

/// Reader for `{"fen": ..., "best": ...}` suites, one object per line.
pub struct JsonlSuiteReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> JsonlSuiteReader<R> {
    pub fn new(reader: R) -> Self { Self { lines: reader.lines(), line_no: 0 } }

    fn decode(line: &str, line_no: usize) -> Result<PuzzleRecord, PuzzleError> {
        let entry: SuiteEntry = serde_json::from_str(line)
            .map_err(|source| PuzzleError::Json { line: line_no, source })?;
        let board_err = |source: BoardError| PuzzleError::Board { line: line_no, source };
        let position = Position::from_fen(&entry.fen).map_err(board_err)?;
        position.clone().play_uci(&entry.best).map_err(board_err)?;
        Ok(PuzzleRecord::bare(format!("line-{}", line_no), position, vec![entry.best]))
    }
}

impl<R: BufRead> Iterator for JsonlSuiteReader<R> {
    type Item = Result<PuzzleRecord, PuzzleError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            let l = line.trim();
            if l.is_empty() { continue; }
            return Some(Self::decode(l, self.line_no));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleFormat {
    LichessCsv,
    JsonlSuite,
}

impl PuzzleFormat {
    /// `.csv` is a Lichess export; `.jsonl` and `.txt` are suites. Any other
    /// extension is rejected rather than guessed.
    pub fn from_path(path: &Path) -> Result<Self, PuzzleError> {
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(PuzzleFormat::LichessCsv),
            Some("jsonl") | Some("txt") => Ok(PuzzleFormat::JsonlSuite),
            _ => Err(PuzzleError::UnknownFormat(path.to_path_buf())),
        }
    }
}

pub type RecordIter = Box<dyn Iterator<Item = Result<PuzzleRecord, PuzzleError>>>;

/// A puzzle file on disk. Every call to [`PuzzleFile::records`] reopens it,
/// so the same file can be run any number of times.
#[derive(Debug, Clone)]
pub struct PuzzleFile {
    path: PathBuf,
    format: PuzzleFormat,
}

impl PuzzleFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PuzzleError> {
        let path = path.as_ref().to_path_buf();
        let format = PuzzleFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn format(&self) -> PuzzleFormat { self.format }
    pub fn exists(&self) -> bool { self.path.is_file() }

    pub fn records(&self) -> Result<RecordIter, PuzzleError> {
        let rdr = BufReader::new(File::open(&self.path)?);
        Ok(match self.format {
            PuzzleFormat::LichessCsv => Box::new(CsvPuzzleReader::new(rdr)?),
            PuzzleFormat::JsonlSuite => Box::new(JsonlSuiteReader::new(rdr)),
        })
    }
}

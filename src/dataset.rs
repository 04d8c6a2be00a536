//! Location of the Lichess puzzle dataset used by the `puzzlebench` binary.

use std::path::PathBuf;

pub const DB_DIR: &str = "db";
pub const DB_PREFIX: &str = "lichess_db_puzzle";

/// Sample sizes shipped next to the full dump.
pub const SAMPLE_SIZES: [u32; 2] = [50, 500];

/// Shown when the dataset file is absent.
pub const DOWNLOAD_HINT: &str = "Please run `./download_db.sh` to download the required dataset.";

/// Parse a `-n` value; only the shipped sample sizes are accepted.
pub fn parse_sample_size(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(n) if SAMPLE_SIZES.contains(&n) => Ok(n),
        _ => Err(format!("'{}' is not one of 50, 500", s)),
    }
}

/// `db/lichess_db_puzzle.csv` for the full dump, `db/lichess_db_puzzle_<n>.csv`
/// for a sample.
pub fn dataset_path(num: Option<u32>) -> PathBuf {
    let name = match num {
        Some(n) => format!("{}_{}.csv", DB_PREFIX, n),
        None => format!("{}.csv", DB_PREFIX),
    };
    PathBuf::from(DB_DIR).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn dataset_file_names() {
        assert_eq!(dataset_path(None), Path::new("db/lichess_db_puzzle.csv"));
        assert_eq!(dataset_path(Some(50)), Path::new("db/lichess_db_puzzle_50.csv"));
        assert_eq!(dataset_path(Some(500)), Path::new("db/lichess_db_puzzle_500.csv"));
    }

    #[test]
    fn only_shipped_sample_sizes_parse() {
        assert_eq!(parse_sample_size("50"), Ok(50));
        assert_eq!(parse_sample_size("500"), Ok(500));
        for bad in ["100", "0", "-50", "fifty", ""] {
            assert!(parse_sample_size(bad).is_err(), "accepted {:?}", bad);
        }
    }
}

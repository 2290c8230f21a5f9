use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the tracker, one per failure point.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("could not convert `{0}` to an amount")]
    InvalidAmount(String),
    #[error("malformed expense record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error("failed to save expenses to {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

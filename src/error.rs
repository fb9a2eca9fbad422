//! Error types for reading game logs and preparing the output directory

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GameLogError {
    /// File could not be opened or read
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row is shorter than the field the current block needs
    #[error("line {line}: missing field {index}")]
    MissingField { line: usize, index: usize },

    /// Numeric field does not hold an integer
    #[error("line {line}: field {index} is not an integer: {value:?}")]
    InvalidNumber {
        line: usize,
        index: usize,
        value: String,
    },

    /// Result block names a winner the roster does not have
    #[error("winner index {0} has no matching player in the roster")]
    UnknownWinner(usize),

    #[error("output path {0} exists and is not a directory")]
    OutputNotDirectory(PathBuf),
}

pub type GameLogResult<T> = Result<T, GameLogError>;

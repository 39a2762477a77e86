use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendError {
    #[error("Missing transaction file: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Missing required column: {0}")]
    MissingHeader(String),

    #[error("Line {line}: cannot parse {field} '{value}': {reason}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SpendError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathflowError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse Error (line {line}): {message}")]
    Parse { line: usize, message: String },

    #[error("Expected {expected} path records, found {found} well-formed")]
    MissingPaths { expected: usize, found: usize },

    #[error("Invalid path #{index}: {reason}")]
    InvalidPath { index: usize, reason: String },

    #[error("Search Engine Error: {0}")]
    Engine(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type PfResult<T> = Result<T, PathflowError>;

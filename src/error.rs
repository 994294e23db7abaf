use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot map input file {path}: {source}")]
    Map {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Worker pool configuration error: {0}")]
    Config(String),
}

use crate::cleaning::types::Column;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a cleaning run
#[derive(Error, Debug)]
pub enum CleaningError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Input repeats required columns: {}", .0.join(", "))]
    DuplicateColumns(Vec<String>),

    #[error("Invalid null policy for '{column}': {reason}")]
    InvalidPolicy { column: Column, reason: String },

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for cleaning operations
pub type Result<T> = std::result::Result<T, CleaningError>;

impl CleaningError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleaningError::Io {
            path: path.into(),
            source,
        }
    }
}

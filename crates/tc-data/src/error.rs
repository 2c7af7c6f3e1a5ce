//! Error types for loading and saving data files.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while reading or writing the data directory.
#[derive(Debug, Error)]
pub enum DataError {
    /// A file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A file is not valid JSON or does not have the expected shape.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The contents are well-formed but unusable.
    #[error("invalid data: {0}")]
    Invalid(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Error types for matrix algebra and mesh loading
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for mesh loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Misuse of the matrix API. These are programmer errors, raised at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("invalid matrix dimensions {rows}x{cols}: both must be greater than zero")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("row {row} is out of range for a matrix with {rows} rows")]
    OutOfRange { row: usize, rows: usize },

    #[error("cannot multiply a {}x{} matrix by a {}x{} matrix", .left.0, .left.1, .right.0, .right.1)]
    IncompatibleDimensions {
        left: (usize, usize),
        right: (usize, usize),
    },
}

/// Why a mesh load attempt failed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input parsed cleanly but has no vertices or no faces.
    #[error("mesh has no vertices or no faces")]
    EmptyFile,

    /// A vertex or face line is malformed.
    #[error("corrupted mesh data at line {line}: {reason}")]
    FileCorrupted { line: usize, reason: String },
}

/// Plain status code for a load attempt, comparable without the error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStatus {
    Ok,
    ReadError,
    EmptyFile,
    FileCorrupted,
}

impl LoadError {
    pub(crate) fn corrupted(line: usize, reason: impl Into<String>) -> Self {
        Self::FileCorrupted {
            line,
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> LoadStatus {
        match self {
            Self::ReadError { .. } => LoadStatus::ReadError,
            Self::EmptyFile => LoadStatus::EmptyFile,
            Self::FileCorrupted { .. } => LoadStatus::FileCorrupted,
        }
    }
}

impl<T> From<&LoadResult<T>> for LoadStatus {
    fn from(result: &LoadResult<T>) -> Self {
        match result {
            Ok(_) => LoadStatus::Ok,
            Err(e) => e.status(),
        }
    }
}

//! Errors surfaced by the documentation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// An unrecoverable failure that aborts a generation run
#[derive(Error, Debug)]
pub enum DocError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source root not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("invalid discovery pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl DocError {
    /// Wrap an I/O error with the path it happened on
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for pipeline operations
pub type DocResult<T> = Result<T, DocError>;

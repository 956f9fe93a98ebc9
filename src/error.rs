//! Error types for strudel-manifest

use std::path::PathBuf;
use thiserror::Error;

/// Audio file scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for `todostash`.

use std::path::PathBuf;

/// Errors that can occur in the todo engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A todo was submitted with empty (or whitespace-only) text.
    #[error("todo text cannot be empty")]
    EmptyText,

    /// A backup file could not be parsed as an export document.
    #[error("invalid backup file: {0}")]
    InvalidBackup(String),

    /// A backup file was not found on disk.
    #[error("backup file not found: {0}")]
    BackupNotFound(PathBuf),

    /// The persistence backend rejected a read or write.
    #[error("storage error: {0}")]
    Storage(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

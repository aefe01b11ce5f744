use std::path::PathBuf;

use plp_migrate_core::RecordError;
use thiserror::Error;

/// Errors that can occur while reading, migrating, or writing exports.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// An input file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A source URL has no path segment to derive a handle from
    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// An expected column is missing, or rows do not line up
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read, parsed, or written
    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<RecordError> for MigrateError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MalformedUrl { url, reason } => Self::MalformedUrl { url, reason },
            RecordError::SchemaMismatch(msg) => Self::SchemaMismatch(msg),
        }
    }
}

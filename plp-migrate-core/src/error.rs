use thiserror::Error;

/// Errors that can occur while interpreting source or target records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The URL has no path segment a handle can be derived from
    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// An expected column is missing, or a row does not line up with the header
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl RecordError {
    pub fn malformed_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }
}

use plp_migrate_lib::MigrateError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Migration library error
    #[error("{0}")]
    Migrate(#[from] MigrateError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// One or more spot-check expectations failed
    #[error("{failed} of {total} checks failed")]
    CheckFailed { failed: usize, total: usize },

    /// Logger setup failed
    #[error("Logger error: {0}")]
    Logger(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn logger(msg: impl Into<String>) -> Self {
        Self::Logger(msg.into())
    }
}

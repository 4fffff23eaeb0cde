//! Error taxonomy for the portfolio components
//!
//! None of these are fatal. `TerminalError` becomes a visible transcript line,
//! `StorageError` is logged and replaced with a safe default by the caller.

use thiserror::Error;

/// Failures reported by a key/value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read or written (missing permissions, full disk, ...)
    #[error("storage unavailable for key '{key}': {source}")]
    Unavailable {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A value exists but does not have the expected shape
    #[error("storage value for key '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StorageError {
    pub fn unavailable(key: &str, source: std::io::Error) -> Self {
        Self::Unavailable {
            key: key.to_string(),
            source,
        }
    }

    pub fn corrupt(key: &str, reason: impl ToString) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Failures surfaced by the command terminal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerminalError {
    #[error("Command not found: \"{0}\". Type \"help\" for available commands.")]
    UnknownCommand(String),
}

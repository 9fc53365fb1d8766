// src/error.rs
// =============================================================================
// Error type shared by the explorer core, the CLI and the server.
//
// Remote failures are not recovered from: they are wrapped once and carried
// up to whichever surface is showing them.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Any failure reported by the source-control service or its SDK
    /// (bad credentials, network, missing repository or path, ...)
    #[error("remote call {operation} failed: {message}")]
    Remote { operation: &'static str, message: String },

    /// A handler needed a client before the sidebar form was submitted
    #[error("not connected: submit a profile and region first")]
    NotConnected,

    #[error("{path} is not valid UTF-8 text")]
    InvalidUtf8 { path: String },

    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl ExplorerError {
    pub fn remote(operation: &'static str, err: impl std::fmt::Display) -> Self {
        ExplorerError::Remote {
            operation,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

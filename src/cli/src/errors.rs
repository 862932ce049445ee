//! Error types for the ledger CLI.

use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the ledger CLI.
#[derive(Debug)]
pub enum CliError {
    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when a network operation fails.
    NetworkError(String),

    /// Error when an address argument is not valid hex of the right size.
    InvalidAddress(String),

    /// Error when the node returns a malformed response.
    NodeRequestFailed(String),

    /// Error when the node rejects the requested operation.
    Rejected(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError(e) => write!(f, "File error: {}", e),
            CliError::JsonError(e) => write!(f, "JSON error: {}", e),
            CliError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            CliError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            CliError::NodeRequestFailed(msg) => write!(f, "Node request failed: {}", msg),
            CliError::Rejected(msg) => write!(f, "Operation rejected: {}", msg),
        }
    }
}

impl StdError for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::FileError(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::JsonError(error)
    }
}

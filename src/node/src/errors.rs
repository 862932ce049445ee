//! Error types for the node daemon.

use ledger::LedgerError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the node daemon.
#[derive(Debug)]
pub enum NodeError {
    /// Error when a ledger operation is rejected.
    LedgerError(LedgerError),

    /// Error when reading or writing the execution journal.
    JournalError(String),

    /// Error when an RPC operation fails.
    RpcError(String),

    /// Error when a configuration operation fails.
    ConfigError(String),
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::LedgerError(e) => write!(f, "Ledger error: {}", e),
            NodeError::JournalError(msg) => write!(f, "Journal error: {}", msg),
            NodeError::RpcError(msg) => write!(f, "RPC error: {}", msg),
            NodeError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl StdError for NodeError {}

impl From<LedgerError> for NodeError {
    fn from(error: LedgerError) -> Self {
        NodeError::LedgerError(error)
    }
}

//! Core accounting primitives for the fungible token ledger.
//!
//! This crate provides the ledger state machine: per-holder balances,
//! per-(owner, spender) allowances, and total-supply tracking, mutated
//! exclusively through the operations on [`state::Ledger`].

pub mod errors;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use errors::{AddressRole, LedgerError};
pub use state::Ledger;
pub use types::{Address, Amount, LedgerOp, ZERO_ADDRESS};

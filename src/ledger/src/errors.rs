//! Error types for the ledger crate.

use crate::types::Amount;
use std::fmt;
use thiserror::Error;

/// The role a rejected address plays in the failing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressRole {
    /// The account credited by mint or debited by burn.
    Account,
    /// The owner granting an allowance.
    Owner,
    /// The spender consuming an allowance.
    Spender,
    /// The holder tokens move out of.
    Sender,
    /// The holder tokens move into.
    Recipient,
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressRole::Account => "Account",
            AddressRole::Owner => "Owner",
            AddressRole::Spender => "Spender",
            AddressRole::Sender => "Sender",
            AddressRole::Recipient => "Recipient",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur in the ledger crate.
///
/// Every error is detected before any state mutation, so a rejected
/// operation leaves the ledger untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Error when a required address argument is the zero address.
    #[error("{role} address cannot be 0")]
    InvalidAddress {
        /// The role the offending address plays in the operation
        role: AddressRole,
    },

    /// Error when a holder's balance is less than the requested amount.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// The requested amount
        required: Amount,
        /// The holder's balance
        available: Amount,
    },

    /// Error when the spender's allowance is less than the requested amount.
    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// The requested amount
        required: Amount,
        /// The allowance granted to the spender
        available: Amount,
    },

    /// Error when an arithmetic accumulation would exceed the representable range.
    #[error("Amount overflows the representable supply range")]
    Overflow,
}

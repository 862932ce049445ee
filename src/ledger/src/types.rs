//! Core types for the fungible token ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 20-byte account address.
pub type Address = [u8; 20];

/// Token quantity, represented as a 128-bit unsigned integer.
pub type Amount = u128;

/// The distinguished "no participant" address. Never a valid counterparty
/// to a mutating operation.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Returns true if `addr` is the zero address.
pub fn is_zero(addr: &Address) -> bool {
    *addr == ZERO_ADDRESS
}

/// Mutating ledger operations, as recorded in the execution journal.
///
/// The acting identity is an explicit field on every variant that has one;
/// there is no ambient caller context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerOp {
    /// Create new tokens in a holder's balance.
    Mint {
        /// The account being credited
        to: Address,
        /// The amount to mint
        amount: Amount,
    },

    /// Destroy tokens held by an account.
    Burn {
        /// The account being debited
        from: Address,
        /// The amount to burn
        amount: Amount,
    },

    /// Move tokens from the caller's balance to a recipient.
    Transfer {
        /// The acting identity, debited as sender
        caller: Address,
        /// The account being credited
        recipient: Address,
        /// The amount to transfer
        amount: Amount,
    },

    /// Move tokens out of a holder's balance using the caller's allowance.
    TransferFrom {
        /// The acting identity, spending its allowance
        caller: Address,
        /// The holder being debited
        sender: Address,
        /// The account being credited
        recipient: Address,
        /// The amount to transfer
        amount: Amount,
    },

    /// Set the caller's allowance for a spender to an absolute amount.
    Approve {
        /// The acting identity, granting as owner
        caller: Address,
        /// The spender being granted
        spender: Address,
        /// The new allowance (overwrites any prior value)
        amount: Amount,
    },
}

impl fmt::Display for LedgerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerOp::Mint { to, amount } => {
                write!(f, "Mint {{ to: {}, amount: {} }}", hex::encode(to), amount)
            }
            LedgerOp::Burn { from, amount } => {
                write!(f, "Burn {{ from: {}, amount: {} }}", hex::encode(from), amount)
            }
            LedgerOp::Transfer { caller, recipient, amount } => {
                write!(
                    f,
                    "Transfer {{ caller: {}, recipient: {}, amount: {} }}",
                    hex::encode(caller),
                    hex::encode(recipient),
                    amount
                )
            }
            LedgerOp::TransferFrom { caller, sender, recipient, amount } => {
                write!(
                    f,
                    "TransferFrom {{ caller: {}, sender: {}, recipient: {}, amount: {} }}",
                    hex::encode(caller),
                    hex::encode(sender),
                    hex::encode(recipient),
                    amount
                )
            }
            LedgerOp::Approve { caller, spender, amount } => {
                write!(
                    f,
                    "Approve {{ caller: {}, spender: {}, amount: {} }}",
                    hex::encode(caller),
                    hex::encode(spender),
                    amount
                )
            }
        }
    }
}

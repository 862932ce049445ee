//! Commands for the ledger CLI.

pub mod allowance;
pub mod approve;
pub mod balance;
pub mod burn;
pub mod mint;
pub mod supply;
pub mod transfer;
pub mod transfer_from;

//! Node daemon for the token ledger.
//!
//! Hosts a single [`ledger::Ledger`] behind a JSON-RPC surface, journals
//! every applied operation to an append-only file, and rebuilds the state
//! by replaying that journal at startup.

pub mod config;
pub mod errors;
pub mod journal;
pub mod metrics;
pub mod rpc;

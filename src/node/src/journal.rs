//! Append-only execution journal.
//!
//! Durability of the in-memory ledger is delegated to this log: every
//! operation the node applies is appended as one JSON-encoded [`LedgerOp`]
//! per line, and startup rebuilds the ledger by replaying the file in
//! order. Only operations that were accepted by the ledger are ever
//! written, so replay must accept every entry; an entry that fails to
//! parse or to apply means the journal and the state machine have
//! diverged, and replay stops with an error rather than skipping it.

use crate::errors::NodeError;
use ledger::{Ledger, LedgerOp};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;
use tracing::info;

/// Handle to the journal file, opened in append mode.
pub struct Journal {
    file: File,
}

impl Journal {
    /// Opens the journal for appending, creating the file and its parent
    /// directory if they do not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NodeError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NodeError::JournalError(format!(
                    "Failed to create journal directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                NodeError::JournalError(format!(
                    "Failed to open journal {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;

        Ok(Self { file })
    }

    /// Appends one applied operation to the journal.
    pub fn append(&mut self, op: &LedgerOp) -> Result<(), NodeError> {
        let mut line = serde_json::to_string(op)
            .map_err(|e| NodeError::JournalError(format!("Failed to encode operation: {}", e)))?;
        line.push('\n');

        self.file
            .write_all(line.as_bytes())
            .map_err(|e| NodeError::JournalError(format!("Failed to append operation: {}", e)))?;
        self.file
            .flush()
            .map_err(|e| NodeError::JournalError(format!("Failed to flush journal: {}", e)))?;

        Ok(())
    }

    /// Replays the journal at `path` into `ledger`, returning the number of
    /// operations applied. A missing file is an empty journal.
    pub fn replay<P: AsRef<Path>>(path: P, ledger: &mut Ledger) -> Result<usize, NodeError> {
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No journal found at {}, starting with an empty ledger",
                    path.as_ref().display()
                );
                return Ok(0);
            }
            Err(e) => {
                return Err(NodeError::JournalError(format!(
                    "Failed to open journal {}: {}",
                    path.as_ref().display(),
                    e
                )))
            }
        };

        let reader = BufReader::new(file);
        let mut applied = 0usize;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                NodeError::JournalError(format!("Failed to read journal line {}: {}", lineno + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let op: LedgerOp = serde_json::from_str(&line).map_err(|e| {
                NodeError::JournalError(format!(
                    "Malformed journal entry at line {}: {}",
                    lineno + 1,
                    e
                ))
            })?;

            ledger.apply(op).map_err(|e| {
                NodeError::JournalError(format!(
                    "Journal entry at line {} was rejected on replay: {}",
                    lineno + 1,
                    e
                ))
            })?;
            applied += 1;
        }

        Ok(applied)
    }
}

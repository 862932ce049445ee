//! Configuration for the ledger CLI.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the ledger CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// The node to connect to
    pub node: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            node: "http://localhost:8545".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

//! Configuration for the node daemon.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the node daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// RPC configuration
    pub rpc: RpcConfig,
    /// Metrics configuration
    pub metrics: MetricsConfig,
    /// Storage configuration
    pub storage: StorageConfig,
}

/// RPC configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Listen address for the JSON-RPC server
    pub listen_addr: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether to enable the metrics server
    pub enabled: bool,
    /// Listen address for the metrics server
    pub listen_addr: String,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the data directory holding the execution journal
    pub data_dir: String,
}

/// Default data directory: the platform data dir, falling back to the
/// working directory.
fn default_data_dir() -> String {
    let mut dir = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    dir.push("tally");
    dir.to_string_lossy().to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig {
                listen_addr: "127.0.0.1:8545".to_string(),
            },
            metrics: MetricsConfig {
                enabled: false,
                listen_addr: "127.0.0.1:9090".to_string(),
            },
            storage: StorageConfig {
                data_dir: default_data_dir(),
            },
        }
    }
}

impl NodeConfig {
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

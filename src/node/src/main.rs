//! Node daemon for the token ledger.

use anyhow::Result;
use ledger::Ledger;
use node::config::NodeConfig;
use node::journal::Journal;
use node::metrics::{register_metrics, start_metrics_server};
use node::rpc::start_rpc_server;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the node daemon.
#[derive(Debug, StructOpt)]
#[structopt(name = "tally-node", about = "Token ledger node")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the data directory
    #[structopt(short, long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// JSON-RPC server address
    #[structopt(long)]
    rpc_addr: Option<String>,

    /// Enable metrics server
    #[structopt(long)]
    metrics: bool,

    /// Metrics server address
    #[structopt(long)]
    metrics_addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let config = match &opt.config {
        Some(path) => NodeConfig::from_file(path)?,
        None => NodeConfig::default(),
    };

    // Determine data directory
    let data_dir = opt
        .data_dir
        .unwrap_or_else(|| PathBuf::from(&config.storage.data_dir));
    std::fs::create_dir_all(&data_dir)?;

    // Rebuild the ledger from the execution journal
    let journal_path = data_dir.join("journal.jsonl");
    let mut state = Ledger::new();
    let applied = Journal::replay(&journal_path, &mut state)?;
    info!(
        "Replayed {} operations from {}: {}",
        applied,
        journal_path.display(),
        state
    );

    let journal = Journal::open(&journal_path)?;
    let state = Arc::new(Mutex::new(state));
    let journal = Arc::new(Mutex::new(journal));

    // Start the metrics server if enabled
    if opt.metrics || config.metrics.enabled {
        register_metrics();
        let metrics_addr = opt
            .metrics_addr
            .unwrap_or_else(|| config.metrics.listen_addr.clone())
            .parse()?;
        start_metrics_server(metrics_addr).await?;
        info!("Metrics server listening on {}", metrics_addr);
    }

    // Start the JSON-RPC server
    let rpc_addr = opt
        .rpc_addr
        .unwrap_or_else(|| config.rpc.listen_addr.clone())
        .parse()?;
    start_rpc_server(rpc_addr, state, journal).await?;
    info!("JSON-RPC server listening on {}", rpc_addr);

    info!("Node started");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}

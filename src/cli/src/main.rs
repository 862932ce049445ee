//! Command-line client for the token ledger node.

mod commands;
mod config;
mod errors;
mod rpc;

use anyhow::Result;
use colored::Colorize;
use commands::{allowance, approve, balance, burn, mint, supply, transfer, transfer_from};
use config::CliConfig;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the ledger CLI.
#[derive(Debug, StructOpt)]
#[structopt(name = "tally", about = "Token ledger command-line client")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Node to connect to
    #[structopt(short, long)]
    node: Option<String>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the ledger CLI.
#[derive(Debug, StructOpt)]
enum Command {
    /// Get the balance of an account
    #[structopt(name = "balance")]
    Balance {
        /// Account address (40-char hex, optional 0x prefix)
        address: String,
    },

    /// Get the total token supply
    #[structopt(name = "supply")]
    Supply,

    /// Get the allowance a spender holds over an owner's balance
    #[structopt(name = "allowance")]
    Allowance {
        /// Owner address
        #[structopt(long)]
        owner: String,

        /// Spender address
        #[structopt(long)]
        spender: String,
    },

    /// Mint new tokens to an account
    #[structopt(name = "mint")]
    Mint {
        /// Recipient address
        #[structopt(long)]
        to: String,

        /// Amount to mint
        #[structopt(long)]
        amount: u128,
    },

    /// Burn tokens held by an account
    #[structopt(name = "burn")]
    Burn {
        /// Holder address
        #[structopt(long)]
        from: String,

        /// Amount to burn
        #[structopt(long)]
        amount: u128,
    },

    /// Set a spender's allowance over the caller's balance
    #[structopt(name = "approve")]
    Approve {
        /// Acting identity (the owner granting the allowance)
        #[structopt(long)]
        caller: String,

        /// Spender address
        #[structopt(long)]
        spender: String,

        /// New allowance (absolute, overwrites any prior value)
        #[structopt(long)]
        amount: u128,
    },

    /// Transfer tokens from the caller's balance
    #[structopt(name = "transfer")]
    Transfer {
        /// Acting identity (the sender)
        #[structopt(long)]
        caller: String,

        /// Recipient address
        #[structopt(long)]
        to: String,

        /// Amount to transfer
        #[structopt(long)]
        amount: u128,
    },

    /// Transfer tokens out of another holder's balance using an allowance
    #[structopt(name = "transfer-from")]
    TransferFrom {
        /// Acting identity (the spender)
        #[structopt(long)]
        caller: String,

        /// Holder address tokens move out of
        #[structopt(long)]
        from: String,

        /// Recipient address
        #[structopt(long)]
        to: String,

        /// Amount to transfer
        #[structopt(long)]
        amount: u128,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration: explicit file, then the user config dir, then defaults
    let mut config = match &opt.config {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let mut default_path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            default_path.push("tally");
            default_path.push("config.json");
            if default_path.exists() {
                CliConfig::from_file(&default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    // Override node if specified
    if let Some(node) = opt.node {
        config.node = node;
    }

    // Run the appropriate command
    match opt.cmd {
        Command::Balance { address } => {
            let balance = balance::run(&config, &address).await?;
            println!("{} {}", "Balance:".green(), balance);
        }
        Command::Supply => {
            let supply = supply::run(&config).await?;
            println!("{} {}", "Total supply:".green(), supply);
        }
        Command::Allowance { owner, spender } => {
            let allowance = allowance::run(&config, &owner, &spender).await?;
            println!("{} {}", "Allowance:".green(), allowance);
        }
        Command::Mint { to, amount } => {
            let msg = mint::run(&config, &to, amount).await?;
            println!("{} {}", "Tokens minted:".green(), msg);
        }
        Command::Burn { from, amount } => {
            let msg = burn::run(&config, &from, amount).await?;
            println!("{} {}", "Tokens burned:".green(), msg);
        }
        Command::Approve { caller, spender, amount } => {
            let msg = approve::run(&config, &caller, &spender, amount).await?;
            println!("{} {}", "Approval set:".green(), msg);
        }
        Command::Transfer { caller, to, amount } => {
            let msg = transfer::run(&config, &caller, &to, amount).await?;
            println!("{} {}", "Transfer complete:".green(), msg);
        }
        Command::TransferFrom { caller, from, to, amount } => {
            let msg = transfer_from::run(&config, &caller, &from, &to, amount).await?;
            println!("{} {}", "Transfer complete:".green(), msg);
        }
    }

    Ok(())
}

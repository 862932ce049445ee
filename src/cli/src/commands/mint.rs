//! Mint command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;
use tracing::info;

/// Runs the mint command.
pub async fn run(config: &CliConfig, to: &str, amount: u128) -> Result<String, CliError> {
    let to_hex = rpc::normalize_address(to)?;
    info!("Minting {} tokens to {}", amount, to_hex);

    let result = rpc::call(
        &config.node,
        "mint",
        serde_json::json!([to_hex, amount.to_string()]),
    )
    .await?;
    rpc::expect_ok(&result)?;

    Ok(format!("minted {} tokens to {}", amount, to_hex))
}

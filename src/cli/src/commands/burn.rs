//! Burn command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;
use tracing::info;

/// Runs the burn command.
pub async fn run(config: &CliConfig, from: &str, amount: u128) -> Result<String, CliError> {
    let from_hex = rpc::normalize_address(from)?;
    info!("Burning {} tokens from {}", amount, from_hex);

    let result = rpc::call(
        &config.node,
        "burn",
        serde_json::json!([from_hex, amount.to_string()]),
    )
    .await?;
    rpc::expect_ok(&result)?;

    Ok(format!("burned {} tokens from {}", amount, from_hex))
}

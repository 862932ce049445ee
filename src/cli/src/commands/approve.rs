//! Approve command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;
use tracing::info;

/// Runs the approve command. `caller` is the acting identity granting the
/// allowance as owner. The amount is an absolute overwrite of any prior
/// allowance for the spender.
pub async fn run(
    config: &CliConfig,
    caller: &str,
    spender: &str,
    amount: u128,
) -> Result<String, CliError> {
    let caller_hex = rpc::normalize_address(caller)?;
    let spender_hex = rpc::normalize_address(spender)?;
    info!("{} approving {} for {} tokens", caller_hex, spender_hex, amount);

    let result = rpc::call(
        &config.node,
        "approve",
        serde_json::json!([caller_hex, spender_hex, amount.to_string()]),
    )
    .await?;
    rpc::expect_ok(&result)?;

    Ok(format!("approved {} for {} tokens", spender_hex, amount))
}

//! Delegated transfer command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;
use tracing::info;

/// Runs the transfer-from command. `caller` is the acting identity
/// spending its allowance over `from`'s balance.
pub async fn run(
    config: &CliConfig,
    caller: &str,
    from: &str,
    to: &str,
    amount: u128,
) -> Result<String, CliError> {
    let caller_hex = rpc::normalize_address(caller)?;
    let from_hex = rpc::normalize_address(from)?;
    let to_hex = rpc::normalize_address(to)?;
    info!(
        "{} moving {} tokens from {} to {}",
        caller_hex, amount, from_hex, to_hex
    );

    let result = rpc::call(
        &config.node,
        "transfer_from",
        serde_json::json!([caller_hex, from_hex, to_hex, amount.to_string()]),
    )
    .await?;
    rpc::expect_ok(&result)?;

    Ok(format!("moved {} tokens from {} to {}", amount, from_hex, to_hex))
}

//! Transfer command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;
use tracing::info;

/// Runs the transfer command. `caller` is the acting identity whose
/// balance is debited.
pub async fn run(
    config: &CliConfig,
    caller: &str,
    to: &str,
    amount: u128,
) -> Result<String, CliError> {
    let caller_hex = rpc::normalize_address(caller)?;
    let to_hex = rpc::normalize_address(to)?;
    info!("Transferring {} tokens from {} to {}", amount, caller_hex, to_hex);

    let result = rpc::call(
        &config.node,
        "transfer",
        serde_json::json!([caller_hex, to_hex, amount.to_string()]),
    )
    .await?;
    rpc::expect_ok(&result)?;

    Ok(format!("transferred {} tokens to {}", amount, to_hex))
}

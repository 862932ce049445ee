//! Allowance command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;

/// Runs the allowance command.
pub async fn run(config: &CliConfig, owner: &str, spender: &str) -> Result<String, CliError> {
    let owner_hex = rpc::normalize_address(owner)?;
    let spender_hex = rpc::normalize_address(spender)?;

    let result = rpc::call(
        &config.node,
        "get_allowance",
        serde_json::json!([owner_hex, spender_hex]),
    )
    .await?;

    rpc::amount_from_result(&result)
}

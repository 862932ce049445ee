//! Total-supply command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;

/// Runs the supply command.
pub async fn run(config: &CliConfig) -> Result<String, CliError> {
    let result = rpc::call(&config.node, "get_total_supply", serde_json::json!([])).await?;

    rpc::amount_from_result(&result)
}

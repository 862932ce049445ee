//! Balance command for the ledger CLI.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::rpc;

/// Runs the balance command.
pub async fn run(config: &CliConfig, address: &str) -> Result<String, CliError> {
    let address_hex = rpc::normalize_address(address)?;

    let result = rpc::call(
        &config.node,
        "get_balance",
        serde_json::json!([address_hex]),
    )
    .await?;

    rpc::amount_from_result(&result)
}

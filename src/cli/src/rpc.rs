//! JSON-RPC client helpers for the ledger CLI.

use crate::errors::CliError;
use ledger::Address;
use tracing::debug;

/// Validates a 20-byte hex address argument and returns it normalized
/// (lowercase, no 0x prefix) for the wire.
pub fn normalize_address(input: &str) -> Result<String, CliError> {
    let bytes = hex::decode(input.trim_start_matches("0x"))
        .map_err(|e| CliError::InvalidAddress(format!("{}: {}", input, e)))?;

    let address: Address = bytes.as_slice().try_into().map_err(|_| {
        CliError::InvalidAddress(format!(
            "invalid address length: {} bytes (expected 20)",
            bytes.len()
        ))
    })?;

    Ok(hex::encode(address))
}

/// Calls one JSON-RPC method on the node and returns its result value.
pub async fn call(
    node: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value, CliError> {
    // Make sure to append /rpc to the node URL
    let rpc_url = if node.ends_with("/rpc") {
        node.to_string()
    } else {
        format!("{}/rpc", node)
    };

    debug!("calling {} on {}", method, rpc_url);

    let client = reqwest::Client::new();
    let response = client
        .post(&rpc_url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        }))
        .send()
        .await
        .map_err(|e| CliError::NetworkError(format!("Failed to connect to node: {}", e)))?;

    let response_json: serde_json::Value = response
        .json()
        .await
        .map_err(|e| CliError::NetworkError(format!("Failed to parse response: {}", e)))?;

    if let Some(error) = response_json.get("error") {
        if !error.is_null() {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error")
                .to_string();
            return Err(CliError::Rejected(message));
        }
    }

    response_json
        .get("result")
        .cloned()
        .ok_or_else(|| CliError::NodeRequestFailed("missing result field".to_string()))
}

/// Extracts a string-encoded amount from an RPC result.
pub fn amount_from_result(result: &serde_json::Value) -> Result<String, CliError> {
    result
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| CliError::NodeRequestFailed("expected a string amount".to_string()))
}

/// Checks that a mutating call reported success.
pub fn expect_ok(result: &serde_json::Value) -> Result<(), CliError> {
    if result.as_bool() == Some(true) {
        Ok(())
    } else {
        Err(CliError::NodeRequestFailed(format!(
            "unexpected result: {}",
            result
        )))
    }
}

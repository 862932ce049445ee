//! JSON-RPC server for the node daemon.
//!
//! The operation surface exposed here is exactly the seven ledger
//! operations. The execution environment (the RPC caller) supplies the
//! acting identity as an explicit parameter on every mutating method;
//! the node does not authenticate callers itself.

use crate::journal::Journal;
use crate::metrics;
use anyhow::Result;
use ledger::{Address, Amount, Ledger, LedgerOp};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};
use warp::{Filter, Rejection, Reply};

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC version
    #[allow(dead_code)]
    jsonrpc: String,
    /// Method to call
    method: String,
    /// Parameters for the method
    params: serde_json::Value,
    /// Request ID
    id: serde_json::Value,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC version
    jsonrpc: String,
    /// Result of the method call
    result: Option<serde_json::Value>,
    /// Error, if any
    error: Option<JsonRpcError>,
    /// Request ID
    id: serde_json::Value,
}

/// JSON-RPC error.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code
    code: i32,
    /// Error message
    message: String,
    /// Additional error data
    data: Option<serde_json::Value>,
}

/// Error code for operations the ledger rejected.
const REJECTED_OP_CODE: i32 = -32000;
/// Error code for malformed parameters.
const INVALID_PARAMS_CODE: i32 = -32602;

/// State for the RPC server.
struct RpcState {
    /// The ledger state machine
    ledger: Arc<Mutex<Ledger>>,
    /// The execution journal receiving every applied operation
    journal: Arc<Mutex<Journal>>,
}

/// Starts the JSON-RPC server.
pub async fn start_rpc_server(
    addr: SocketAddr,
    ledger: Arc<Mutex<Ledger>>,
    journal: Arc<Mutex<Journal>>,
) -> Result<()> {
    let state = Arc::new(RpcState { ledger, journal });

    let rpc_route = warp::path("rpc")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handle_rpc);

    tokio::spawn(async move {
        warp::serve(rpc_route).run(addr).await;
    });

    Ok(())
}

/// Provides the RPC state to handlers.
fn with_state(
    state: Arc<RpcState>,
) -> impl Filter<Extract = (Arc<RpcState>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Handles a JSON-RPC request.
async fn handle_rpc(
    request: JsonRpcRequest,
    state: Arc<RpcState>,
) -> Result<impl Reply, Rejection> {
    let id = request.id.clone();
    debug!("RPC: {} {}", request.method, request.params);

    let result = match request.method.as_str() {
        "mint" => handle_mint(&request.params, &state),
        "burn" => handle_burn(&request.params, &state),
        "transfer" => handle_transfer(&request.params, &state),
        "transfer_from" => handle_transfer_from(&request.params, &state),
        "approve" => handle_approve(&request.params, &state),
        "get_balance" => handle_get_balance(&request.params, &state),
        "get_allowance" => handle_get_allowance(&request.params, &state),
        "get_total_supply" => handle_get_total_supply(&state),
        _ => Err(JsonRpcError {
            code: -32601,
            message: "Method not found".to_string(),
            data: None,
        }),
    };

    let response = match result {
        Ok(result) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        },
    };

    Ok(warp::reply::json(&response))
}

/// Extracts a positional parameter array of exactly `len` entries.
fn expect_params(params: &serde_json::Value, len: usize) -> Result<&Vec<serde_json::Value>, JsonRpcError> {
    let params = params.as_array().ok_or_else(|| JsonRpcError {
        code: INVALID_PARAMS_CODE,
        message: "Invalid params".to_string(),
        data: None,
    })?;

    if params.len() != len {
        return Err(JsonRpcError {
            code: INVALID_PARAMS_CODE,
            message: format!("Invalid params: expected {} entries, got {}", len, params.len()),
            data: None,
        });
    }

    Ok(params)
}

/// Parses a 20-byte hex address parameter (optional 0x prefix).
fn parse_address(value: &serde_json::Value) -> Result<Address, JsonRpcError> {
    let address_hex = value.as_str().ok_or_else(|| JsonRpcError {
        code: INVALID_PARAMS_CODE,
        message: "Invalid address".to_string(),
        data: None,
    })?;

    let address_bytes = hex::decode(address_hex.trim_start_matches("0x")).map_err(|e| {
        JsonRpcError {
            code: INVALID_PARAMS_CODE,
            message: "Invalid address".to_string(),
            data: Some(serde_json::to_value(e.to_string()).unwrap()),
        }
    })?;

    if address_bytes.len() != 20 {
        return Err(JsonRpcError {
            code: INVALID_PARAMS_CODE,
            message: format!("Invalid address length: {} (expected 20)", address_bytes.len()),
            data: None,
        });
    }

    let mut address = [0u8; 20];
    address.copy_from_slice(&address_bytes);
    Ok(address)
}

/// Parses an amount parameter. Amounts travel as decimal strings so the
/// full u128 range survives JSON; bare integers are accepted too.
fn parse_amount(value: &serde_json::Value) -> Result<Amount, JsonRpcError> {
    if let Some(s) = value.as_str() {
        return s.parse::<Amount>().map_err(|e| JsonRpcError {
            code: INVALID_PARAMS_CODE,
            message: format!("Invalid amount: {}", e),
            data: None,
        });
    }

    if let Some(n) = value.as_u64() {
        return Ok(n as Amount);
    }

    Err(JsonRpcError {
        code: INVALID_PARAMS_CODE,
        message: "Invalid amount".to_string(),
        data: None,
    })
}

/// Applies one mutating operation: validates against the ledger, journals
/// it on success, and maps a rejection to a JSON-RPC error.
///
/// The ledger mutex is held across the whole apply-and-journal sequence so
/// journal order always matches state order.
fn apply_op(op: LedgerOp, state: &RpcState) -> Result<serde_json::Value, JsonRpcError> {
    let timer = metrics::OP_TIME.start_timer();
    let mut ledger = state.ledger.lock().unwrap();

    match ledger.apply(op.clone()) {
        Ok(()) => {
            let mut journal = state.journal.lock().unwrap();
            if let Err(e) = journal.append(&op) {
                // The operation is already applied; losing the journal
                // entry is logged but does not fail the call.
                error!("Failed to journal {}: {}", op, e);
            }
            metrics::OPS_APPLIED.inc();
            timer.observe_duration();
            info!("Applied {}", op);
            Ok(serde_json::json!(true))
        }
        Err(e) => {
            metrics::OPS_REJECTED.inc();
            timer.observe_duration();
            warn!("Rejected {}: {}", op, e);
            Err(JsonRpcError {
                code: REJECTED_OP_CODE,
                message: e.to_string(),
                data: None,
            })
        }
    }
}

/// Handles the mint method. Params: [to, amount].
fn handle_mint(
    params: &serde_json::Value,
    state: &RpcState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = expect_params(params, 2)?;
    let to = parse_address(&params[0])?;
    let amount = parse_amount(&params[1])?;

    apply_op(LedgerOp::Mint { to, amount }, state)
}

/// Handles the burn method. Params: [from, amount].
fn handle_burn(
    params: &serde_json::Value,
    state: &RpcState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = expect_params(params, 2)?;
    let from = parse_address(&params[0])?;
    let amount = parse_amount(&params[1])?;

    apply_op(LedgerOp::Burn { from, amount }, state)
}

/// Handles the transfer method. Params: [caller, recipient, amount].
fn handle_transfer(
    params: &serde_json::Value,
    state: &RpcState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = expect_params(params, 3)?;
    let caller = parse_address(&params[0])?;
    let recipient = parse_address(&params[1])?;
    let amount = parse_amount(&params[2])?;

    apply_op(LedgerOp::Transfer { caller, recipient, amount }, state)
}

/// Handles the transfer_from method. Params: [caller, sender, recipient, amount].
fn handle_transfer_from(
    params: &serde_json::Value,
    state: &RpcState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = expect_params(params, 4)?;
    let caller = parse_address(&params[0])?;
    let sender = parse_address(&params[1])?;
    let recipient = parse_address(&params[2])?;
    let amount = parse_amount(&params[3])?;

    apply_op(LedgerOp::TransferFrom { caller, sender, recipient, amount }, state)
}

/// Handles the approve method. Params: [caller, spender, amount].
fn handle_approve(
    params: &serde_json::Value,
    state: &RpcState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = expect_params(params, 3)?;
    let caller = parse_address(&params[0])?;
    let spender = parse_address(&params[1])?;
    let amount = parse_amount(&params[2])?;

    apply_op(LedgerOp::Approve { caller, spender, amount }, state)
}

/// Handles the get_balance method. Params: [holder].
fn handle_get_balance(
    params: &serde_json::Value,
    state: &RpcState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = expect_params(params, 1)?;
    let holder = parse_address(&params[0])?;

    let balance = {
        let ledger = state.ledger.lock().unwrap();
        ledger.balance_of(&holder)
    };

    Ok(serde_json::json!(balance.to_string()))
}

/// Handles the get_allowance method. Params: [owner, spender].
fn handle_get_allowance(
    params: &serde_json::Value,
    state: &RpcState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = expect_params(params, 2)?;
    let owner = parse_address(&params[0])?;
    let spender = parse_address(&params[1])?;

    let allowance = {
        let ledger = state.ledger.lock().unwrap();
        ledger.allowance(&owner, &spender)
    };

    Ok(serde_json::json!(allowance.to_string()))
}

/// Handles the get_total_supply method.
fn handle_get_total_supply(state: &RpcState) -> Result<serde_json::Value, JsonRpcError> {
    let supply = {
        let ledger = state.ledger.lock().unwrap();
        ledger.total_supply()
    };

    Ok(serde_json::json!(supply.to_string()))
}

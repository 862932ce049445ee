//! Live-server tests for the node's JSON-RPC surface.

use ledger::Ledger;
use node::journal::Journal;
use node::rpc::start_rpc_server;
use serial_test::serial;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

const ADDR_A: &str = "0000000000000000000000000000000000000001";
const ADDR_B: &str = "0000000000000000000000000000000000000002";
const ZERO: &str = "0000000000000000000000000000000000000000";

/// Starts an RPC server over a fresh ledger and journal, returning the
/// base URL. The TempDir is returned so the journal outlives the test body.
async fn start_test_node(port: u16) -> (String, TempDir) {
    let dir = TempDir::new().unwrap();
    let journal = Journal::open(dir.path().join("journal.jsonl")).unwrap();
    let state = Arc::new(Mutex::new(Ledger::new()));

    let addr: SocketAddr = format!("127.0.0.1:{}", port).parse().unwrap();
    start_rpc_server(addr, state, Arc::new(Mutex::new(journal)))
        .await
        .unwrap();

    // Give the spawned server a moment to bind
    tokio::time::sleep(Duration::from_millis(300)).await;

    (format!("http://127.0.0.1:{}/rpc", port), dir)
}

async fn rpc(url: &str, method: &str, params: serde_json::Value) -> serde_json::Value {
    let client = reqwest::Client::new();
    client
        .post(url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
#[serial]
async fn test_rpc_mint_transfer_and_queries() {
    let (url, _dir) = start_test_node(18545).await;

    let response = rpc(&url, "mint", serde_json::json!([ADDR_A, "1000"])).await;
    assert_eq!(response["result"], serde_json::json!(true));
    assert!(response["error"].is_null());

    let response = rpc(&url, "transfer", serde_json::json!([ADDR_A, ADDR_B, "400"])).await;
    assert_eq!(response["result"], serde_json::json!(true));

    let response = rpc(&url, "get_balance", serde_json::json!([ADDR_A])).await;
    assert_eq!(response["result"], serde_json::json!("600"));

    let response = rpc(&url, "get_balance", serde_json::json!([ADDR_B])).await;
    assert_eq!(response["result"], serde_json::json!("400"));

    let response = rpc(&url, "get_total_supply", serde_json::json!([])).await;
    assert_eq!(response["result"], serde_json::json!("1000"));

    // Delegated flow: approve then transfer_from
    let response = rpc(&url, "approve", serde_json::json!([ADDR_A, ADDR_B, "250"])).await;
    assert_eq!(response["result"], serde_json::json!(true));

    let response = rpc(&url, "get_allowance", serde_json::json!([ADDR_A, ADDR_B])).await;
    assert_eq!(response["result"], serde_json::json!("250"));

    let response = rpc(
        &url,
        "transfer_from",
        serde_json::json!([ADDR_B, ADDR_A, ADDR_B, "250"]),
    )
    .await;
    assert_eq!(response["result"], serde_json::json!(true));

    let response = rpc(&url, "get_allowance", serde_json::json!([ADDR_A, ADDR_B])).await;
    assert_eq!(response["result"], serde_json::json!("0"));

    let response = rpc(&url, "get_balance", serde_json::json!([ADDR_B])).await;
    assert_eq!(response["result"], serde_json::json!("650"));
}

#[tokio::test]
#[serial]
async fn test_rpc_rejections_and_param_errors() {
    let (url, _dir) = start_test_node(18546).await;

    // Zero-address mint is rejected by the ledger with no state change
    let response = rpc(&url, "mint", serde_json::json!([ZERO, "10"])).await;
    assert!(response["result"].is_null());
    assert_eq!(response["error"]["code"], serde_json::json!(-32000));
    let message = response["error"]["message"].as_str().unwrap();
    assert!(message.contains("cannot be 0"), "unexpected message: {}", message);

    let response = rpc(&url, "get_total_supply", serde_json::json!([])).await;
    assert_eq!(response["result"], serde_json::json!("0"));

    // Overspending is rejected with the ledger's message
    let response = rpc(&url, "mint", serde_json::json!([ADDR_A, "5"])).await;
    assert_eq!(response["result"], serde_json::json!(true));

    let response = rpc(&url, "transfer", serde_json::json!([ADDR_A, ADDR_B, "6"])).await;
    assert_eq!(response["error"]["code"], serde_json::json!(-32000));
    let message = response["error"]["message"].as_str().unwrap();
    assert!(message.contains("Insufficient balance"), "unexpected message: {}", message);

    // Malformed address is a params error, not a ledger rejection
    let response = rpc(&url, "get_balance", serde_json::json!(["nothex"])).await;
    assert_eq!(response["error"]["code"], serde_json::json!(-32602));

    // Unknown method
    let response = rpc(&url, "get_root", serde_json::json!([])).await;
    assert_eq!(response["error"]["code"], serde_json::json!(-32601));
}

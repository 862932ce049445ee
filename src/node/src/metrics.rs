//! Metrics for the node daemon.

use anyhow::Result;
use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_histogram, Counter, Histogram, HistogramOpts, Opts,
};
use std::net::SocketAddr;
use warp::Filter;

lazy_static! {
    /// Counter for operations applied to the ledger.
    pub static ref OPS_APPLIED: Counter = register_counter!(
        Opts::new(
            "ledger_operations_applied_total",
            "Total number of operations applied to the ledger"
        )
    )
    .unwrap();

    /// Counter for operations rejected by the ledger.
    pub static ref OPS_REJECTED: Counter = register_counter!(
        Opts::new(
            "ledger_operations_rejected_total",
            "Total number of operations rejected by the ledger"
        )
    )
    .unwrap();

    /// Histogram for operation apply time.
    pub static ref OP_TIME: Histogram = register_histogram!(
        HistogramOpts::new(
            "ledger_operation_seconds",
            "Time to validate and apply one operation"
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0])
    )
    .unwrap();
}

/// Registers all metrics.
pub fn register_metrics() {
    // Metrics are registered via lazy_static
}

/// Starts the metrics server.
pub async fn start_metrics_server(addr: SocketAddr) -> Result<()> {
    let metrics_route = warp::path("metrics").map(|| {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&prometheus::gather(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    });

    tokio::spawn(async move {
        warp::serve(metrics_route).run(addr).await;
    });

    Ok(())
}

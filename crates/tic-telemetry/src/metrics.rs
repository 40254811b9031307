//! Prometheus metrics for the TicToken ledger.
//!
//! All metrics follow the naming convention: `tic_token_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Committed transfers, direct and delegated
    pub static ref TRANSFERS_TOTAL: Counter = Counter::new(
        "tic_token_transfers_total",
        "Total number of committed transfers"
    ).expect("metric creation failed");

    /// Committed approvals
    pub static ref APPROVALS_TOTAL: Counter = Counter::new(
        "tic_token_approvals_total",
        "Total number of committed approvals"
    ).expect("metric creation failed");

    /// Rejected mutations by reason
    pub static ref REJECTIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("tic_token_rejections_total", "Total number of rejected mutations"),
        &["reason"]  // insufficient_balance / insufficient_allowance
    ).expect("metric creation failed");
}

/// Register all ledger metrics with [`REGISTRY`]. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSFERS_TOTAL.clone()),
        Box::new(APPROVALS_TOTAL.clone()),
        Box::new(REJECTIONS_TOTAL.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Count one committed transfer.
pub fn record_transfer() {
    TRANSFERS_TOTAL.inc();
}

/// Count one committed approval.
pub fn record_approval() {
    APPROVALS_TOTAL.inc();
}

/// Count one rejected mutation.
pub fn record_rejection(reason: &str) {
    REJECTIONS_TOTAL.with_label_values(&[reason]).inc();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

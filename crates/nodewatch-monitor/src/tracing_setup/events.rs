//! Structured log events for the poll loop.
//!
//! Each function emits a `tracing` event with structured fields.

use nodewatch_core::models::{AlertKind, NodeState};

use crate::stats::TickReport;

/// Log the start of the poll loop.
pub fn monitor_started(provider: &str, sink: &str, interval_secs: u64, threshold_secs: u64) {
    tracing::info!(
        event = "monitor_started",
        provider = %provider,
        sink = %sink,
        interval_secs = interval_secs,
        threshold_secs = threshold_secs,
        "node monitor started"
    );
}

/// Log the end of the poll loop.
pub fn monitor_stopped(ticks: u64) {
    tracing::info!(event = "monitor_stopped", ticks = ticks, "node monitor stopped");
}

/// Log that the loop was configured off.
pub fn monitor_disabled() {
    tracing::info!(event = "monitor_disabled", "node monitoring disabled by config");
}

/// Log a failed snapshot fetch. The tick is skipped.
pub fn snapshot_failed(provider: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(
        event = "snapshot_failed",
        provider = %provider,
        error = %error,
        "snapshot fetch failed, skipping tick"
    );
}

/// Log a node state change.
pub fn node_transition(node: &str, from: Option<NodeState>, to: NodeState) {
    match from {
        None => tracing::debug!(
            event = "node_transition",
            node = %node,
            to = %to,
            "node first seen"
        ),
        Some(from) => tracing::info!(
            event = "node_transition",
            node = %node,
            from = %from,
            to = %to,
            "node state changed"
        ),
    }
}

/// Log a delivered alert.
pub fn alert_dispatched(kind: AlertKind, node: &str) {
    tracing::info!(
        event = "alert_dispatched",
        kind = %kind,
        node = %node,
        "alert delivered"
    );
}

/// Log a failed delivery. The latch stays set; the alert is not retried.
pub fn delivery_failed(kind: &str, node: &str, error: &dyn std::fmt::Display) {
    tracing::error!(
        event = "delivery_failed",
        kind = %kind,
        node = %node,
        error = %error,
        "alert delivery failed; not retried for this incident"
    );
}

/// Log removal of long-missing entries.
pub fn nodes_pruned(names: &[String]) {
    tracing::info!(event = "nodes_pruned", nodes = ?names, "pruned long-missing nodes");
}

/// Log a completed tick.
pub fn tick_completed(report: &TickReport) {
    tracing::debug!(
        event = "tick_completed",
        nodes = report.nodes_seen,
        ready = report.ready,
        missing = report.missing,
        transitions = report.transitions,
        alerts_sent = report.alerts_sent,
        delivery_failures = report.delivery_failures,
        "tick completed"
    );
}

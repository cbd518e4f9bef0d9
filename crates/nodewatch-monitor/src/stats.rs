//! Per-tick reports and cumulative monitor counters.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub at: Option<DateTime<Utc>>,
    /// The snapshot fetch failed and reconciliation was skipped.
    pub skipped: bool,
    pub nodes_seen: usize,
    pub ready: usize,
    pub missing: usize,
    pub transitions: usize,
    pub alerts_sent: usize,
    pub delivery_failures: usize,
    pub pruned: usize,
}

/// Cumulative counters since the monitor was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    pub ticks: u64,
    pub fetch_failures: u64,
    pub alerts_sent: u64,
    pub delivery_failures: u64,
}

/// Lock-free backing store for [`MonitorStats`], shared with readers.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    ticks: AtomicU64,
    fetch_failures: AtomicU64,
    alerts_sent: AtomicU64,
    delivery_failures: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record(&self, report: &TickReport) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        if report.skipped {
            self.fetch_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.alerts_sent
            .fetch_add(report.alerts_sent as u64, Ordering::Relaxed);
        self.delivery_failures
            .fetch_add(report.delivery_failures as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_delivery(&self, delivered: bool) {
        if delivered {
            self.alerts_sent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.delivery_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> MonitorStats {
        MonitorStats {
            ticks: self.ticks.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            alerts_sent: self.alerts_sent.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

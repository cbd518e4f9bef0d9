use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use nodewatch_core::models::TrackedNode;

use super::Ledger;
use crate::stats::{MonitorStats, StatsCounters};

/// Read-only handle onto a monitor's ledger and counters.
///
/// Cheap to clone and safe to hand to another task (e.g. an on-demand
/// "show current alerts" query). Every read returns a copy.
#[derive(Debug, Clone)]
pub struct LedgerReader {
    ledger: Arc<Ledger>,
    stats: Arc<StatsCounters>,
}

/// Point-in-time view of the monitor for rendering or serialization.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub nodes: Vec<TrackedNode>,
    pub alerted: Vec<TrackedNode>,
    pub stats: MonitorStats,
}

impl LedgerReader {
    pub(crate) fn new(ledger: Arc<Ledger>, stats: Arc<StatsCounters>) -> Self {
        Self { ledger, stats }
    }

    pub fn get(&self, name: &str) -> Option<TrackedNode> {
        self.ledger.get(name)
    }

    pub fn all_names(&self) -> BTreeSet<String> {
        self.ledger.all_names()
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn nodes(&self) -> Vec<TrackedNode> {
        self.ledger.nodes()
    }

    pub fn alerted(&self) -> Vec<TrackedNode> {
        self.ledger.alerted()
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats.snapshot()
    }

    pub fn status(&self) -> StatusView {
        let nodes = self.ledger.nodes();
        let alerted = nodes.iter().filter(|n| n.alerted).cloned().collect();
        StatusView {
            nodes,
            alerted,
            stats: self.stats.snapshot(),
        }
    }
}

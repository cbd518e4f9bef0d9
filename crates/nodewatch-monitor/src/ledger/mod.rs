//! Node health ledger: the single-writer store of [`TrackedNode`] entries.
//!
//! Entries live in a sharded [`DashMap`], so every per-node mutation is applied
//! under that node's shard lock and readers never observe a half-applied update.
//! Only the owning [`Monitor`](crate::Monitor) writes; everyone else goes through
//! [`LedgerReader`].

mod reader;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use nodewatch_core::models::{NodeState, TrackedNode};

pub use reader::{LedgerReader, StatusView};

/// In-memory map of node name to tracked state. Lost on restart.
#[derive(Debug, Default)]
pub struct Ledger {
    nodes: DashMap<String, TrackedNode>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the entry for `name`.
    pub fn get(&self, name: &str) -> Option<TrackedNode> {
        self.nodes.get(name).map(|entry| entry.value().clone())
    }

    /// Create the entry with `create` if absent, then apply `mutate` to it.
    ///
    /// Both steps happen under the entry's shard lock.
    pub fn upsert<R>(
        &self,
        name: &str,
        create: impl FnOnce() -> TrackedNode,
        mutate: impl FnOnce(&mut TrackedNode) -> R,
    ) -> R {
        let mut entry = self.nodes.entry(name.to_string()).or_insert_with(create);
        mutate(entry.value_mut())
    }

    /// Apply `mutate` to an existing entry. Returns `None` if `name` is unknown.
    pub fn update<R>(&self, name: &str, mutate: impl FnOnce(&mut TrackedNode) -> R) -> Option<R> {
        self.nodes
            .get_mut(name)
            .map(|mut entry| mutate(entry.value_mut()))
    }

    /// Names of every tracked node.
    pub fn all_names(&self) -> BTreeSet<String> {
        self.nodes.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Copy of every entry, sorted by name.
    pub fn nodes(&self) -> Vec<TrackedNode> {
        let mut nodes: Vec<TrackedNode> = self.nodes.iter().map(|e| e.value().clone()).collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        nodes
    }

    /// Entries whose alert latch is currently set, sorted by name.
    pub fn alerted(&self) -> Vec<TrackedNode> {
        let mut nodes: Vec<TrackedNode> = self
            .nodes
            .iter()
            .filter(|e| e.value().alerted)
            .map(|e| e.value().clone())
            .collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        nodes
    }

    /// Drop `Missing` entries whose last confirmed health is older than `bound`.
    /// Returns the removed names.
    pub fn prune_missing(&self, now: DateTime<Utc>, bound: chrono::Duration) -> Vec<String> {
        let mut removed = Vec::new();
        self.nodes.retain(|name, node| {
            let stale = node.observed_state == NodeState::Missing && node.unhealthy_for(now) >= bound;
            if stale {
                removed.push(name.clone());
            }
            !stale
        });
        removed.sort();
        removed
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn upsert_creates_once_then_mutates() {
        let ledger = Ledger::new();
        let mut creations = 0;
        for _ in 0..3 {
            ledger.upsert(
                "n1",
                || {
                    creations += 1;
                    TrackedNode::first_sighting("n1", true, t0())
                },
                |node| node.alerted = false,
            );
        }
        assert_eq!(creations, 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn update_unknown_name_is_none() {
        let ledger = Ledger::new();
        assert!(ledger.update("ghost", |n| n.alerted = true).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn prune_only_drops_stale_missing_entries() {
        let ledger = Ledger::new();
        for name in ["gone", "flaky", "fine"] {
            ledger.upsert(name, || TrackedNode::first_sighting(name, true, t0()), |_| ());
        }
        ledger.update("gone", |n| n.observed_state = NodeState::Missing);
        ledger.update("flaky", |n| n.observed_state = NodeState::NotReady);

        let now = t0() + chrono::Duration::days(8);
        let removed = ledger.prune_missing(now, chrono::Duration::days(7));
        assert_eq!(removed, vec!["gone".to_string()]);
        assert_eq!(
            ledger.all_names().into_iter().collect::<Vec<_>>(),
            vec!["fine".to_string(), "flaky".to_string()]
        );
    }
}

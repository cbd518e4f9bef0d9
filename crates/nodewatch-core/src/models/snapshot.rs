use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One poll's complete readiness mapping over all currently visible nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    nodes: BTreeMap<String, bool>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ready: bool) {
        self.nodes.insert(name.into(), ready);
    }

    /// Readiness of `name`, or `None` if the node is not in this snapshot.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.nodes.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.nodes.iter().map(|(name, ready)| (name.as_str(), *ready))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.nodes.values().filter(|ready| **ready).count()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(|(n, r)| (n.into(), r)).collect(),
        }
    }
}

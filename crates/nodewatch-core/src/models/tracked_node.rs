use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Readiness as seen by the monitor, including absence from the latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Ready,
    NotReady,
    Missing,
}

impl NodeState {
    pub fn from_ready(ready: bool) -> Self {
        if ready {
            Self::Ready
        } else {
            Self::NotReady
        }
    }

    pub fn is_unhealthy(self) -> bool {
        !matches!(self, Self::Ready)
    }
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ready => "Ready",
            Self::NotReady => "NotReady",
            Self::Missing => "Missing",
        })
    }
}

/// One ledger entry per node name ever observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedNode {
    pub name: String,
    pub observed_state: NodeState,
    /// When the node first appeared in a snapshot.
    pub first_seen_at: DateTime<Utc>,
    /// Most recent poll at which the node was confirmed ready. `None` if never ready.
    pub last_healthy_at: Option<DateTime<Utc>>,
    /// Latch: an alert went out for the current incident.
    pub alerted: bool,
}

impl TrackedNode {
    /// Seed an entry from its first sighting.
    pub fn first_sighting(name: impl Into<String>, ready: bool, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            observed_state: NodeState::from_ready(ready),
            first_seen_at: now,
            last_healthy_at: ready.then_some(now),
            alerted: false,
        }
    }

    /// Reference point for the unhealthy duration: last confirmed health, or first sighting.
    pub fn baseline(&self) -> DateTime<Utc> {
        self.last_healthy_at.unwrap_or(self.first_seen_at)
    }

    /// Time elapsed since [`baseline`](Self::baseline), never negative.
    pub fn unhealthy_for(&self, now: DateTime<Utc>) -> chrono::Duration {
        (now - self.baseline()).max(chrono::Duration::zero())
    }
}

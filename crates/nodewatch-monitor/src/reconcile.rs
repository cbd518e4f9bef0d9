//! Reconciliation of one readiness snapshot against the ledger.
//!
//! For each node in the snapshot:
//! - unseen → create, seeded from the current readiness
//! - ready → recovery alert if the current incident was alerted, latch cleared,
//!   `last_healthy_at = now`
//! - not ready → `NotReady`; degraded alert once unhealthy for at least the threshold
//!
//! For each tracked node absent from the snapshot:
//! - `Missing`; missing alert once the time since last confirmed health reaches the threshold
//!
//! The `alerted` latch allows at most one alert per incident. Only a return to
//! `Ready` re-arms it.

use chrono::{DateTime, Utc};

use nodewatch_core::models::{Alert, NodeState, Snapshot, TrackedNode};

use crate::ledger::Ledger;

/// A change of observed state. `from` is `None` on first sighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub node: String,
    pub from: Option<NodeState>,
    pub to: NodeState,
}

/// Everything one reconciliation pass decided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Alerts to dispatch, in the order they were decided.
    pub alerts: Vec<Alert>,
    pub transitions: Vec<Transition>,
    pub missing: usize,
}

/// Apply `snapshot` to `ledger` at time `now`.
///
/// Ledger mutations are committed here, before any alert is delivered.
pub fn reconcile(
    ledger: &Ledger,
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    threshold: chrono::Duration,
) -> Reconciliation {
    let mut out = Reconciliation::default();

    for (name, ready) in snapshot.iter() {
        let mut created = false;
        let (from, to, alert) = ledger.upsert(
            name,
            || {
                created = true;
                TrackedNode::first_sighting(name, ready, now)
            },
            |node| {
                let from = node.observed_state;
                let alert = if ready {
                    mark_ready(node, now)
                } else {
                    mark_not_ready(node, now, threshold)
                };
                (from, node.observed_state, alert)
            },
        );

        if created {
            out.transitions.push(Transition {
                node: name.to_string(),
                from: None,
                to,
            });
        } else if from != to {
            out.transitions.push(Transition {
                node: name.to_string(),
                from: Some(from),
                to,
            });
        }
        out.alerts.extend(alert);
    }

    for name in ledger.all_names() {
        if snapshot.contains(&name) {
            continue;
        }
        out.missing += 1;
        let Some((from, alert)) = ledger.update(&name, |node| {
            let from = node.observed_state;
            node.observed_state = NodeState::Missing;
            (from, escalate(node, now, threshold))
        }) else {
            continue;
        };
        if from != NodeState::Missing {
            out.transitions.push(Transition {
                node: name.clone(),
                from: Some(from),
                to: NodeState::Missing,
            });
        }
        out.alerts.extend(alert);
    }

    out
}

fn mark_ready(node: &mut TrackedNode, now: DateTime<Utc>) -> Option<Alert> {
    let recovered = node.observed_state.is_unhealthy() && node.alerted;
    node.observed_state = NodeState::Ready;
    node.alerted = false;
    node.last_healthy_at = Some(node.last_healthy_at.map_or(now, |prev| prev.max(now)));
    recovered.then(|| Alert::recovered(&node.name))
}

fn mark_not_ready(
    node: &mut TrackedNode,
    now: DateTime<Utc>,
    threshold: chrono::Duration,
) -> Option<Alert> {
    // A missing node that reappears unready is still unhealthy, not recovered.
    node.observed_state = NodeState::NotReady;
    escalate(node, now, threshold)
}

/// Set the latch and produce the alert matching the node's current state once the
/// unhealthy duration reaches `threshold`.
fn escalate(
    node: &mut TrackedNode,
    now: DateTime<Utc>,
    threshold: chrono::Duration,
) -> Option<Alert> {
    if node.alerted || !node.observed_state.is_unhealthy() {
        return None;
    }
    let elapsed = node.unhealthy_for(now);
    if elapsed < threshold {
        return None;
    }
    node.alerted = true;
    Some(match node.observed_state {
        NodeState::Missing => Alert::missing(&node.name, elapsed),
        _ => Alert::degraded(&node.name, elapsed),
    })
}

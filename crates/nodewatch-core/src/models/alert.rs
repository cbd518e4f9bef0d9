use serde::{Deserialize, Serialize};

/// The three notifications the monitor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Node reported not ready for at least the alert threshold.
    Degraded,
    /// Node absent from snapshots for at least the alert threshold.
    Missing,
    /// Node back to ready after an alerted incident.
    Recovered,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Degraded => "degraded",
            Self::Missing => "missing",
            Self::Recovered => "recovered",
        })
    }
}

/// A qualifying transition waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub node: String,
    /// Elapsed unhealthy time. Set for degraded and missing alerts.
    pub unhealthy_for: Option<chrono::Duration>,
}

impl Alert {
    pub fn degraded(node: impl Into<String>, unhealthy_for: chrono::Duration) -> Self {
        Self {
            kind: AlertKind::Degraded,
            node: node.into(),
            unhealthy_for: Some(unhealthy_for),
        }
    }

    pub fn missing(node: impl Into<String>, unhealthy_for: chrono::Duration) -> Self {
        Self {
            kind: AlertKind::Missing,
            node: node.into(),
            unhealthy_for: Some(unhealthy_for),
        }
    }

    pub fn recovered(node: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Recovered,
            node: node.into(),
            unhealthy_for: None,
        }
    }
}

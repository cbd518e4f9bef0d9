use super::{ConfigError, NotificationError, SnapshotError};

/// Top-level error for the nodewatch workspace.
#[derive(Debug, thiserror::Error)]
pub enum NodeWatchError {
    #[error("snapshot fetch failed: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("notification delivery failed: {0}")]
    Notification(#[from] NotificationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type NodeWatchResult<T> = Result<T, NodeWatchError>;

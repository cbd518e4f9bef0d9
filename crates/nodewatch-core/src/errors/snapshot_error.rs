/// Cluster state provider failures. Always transient: the tick is skipped.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cluster provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("cluster provider returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("invalid cluster response: {reason}")]
    InvalidResponse { reason: String },

    #[error("credentials unavailable: {reason}")]
    Credentials { reason: String },

    #[error("snapshot fetch timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

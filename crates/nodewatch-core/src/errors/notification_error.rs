/// Notification sink failures. Logged and swallowed; never retried for the same incident.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("sink unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("sink rejected message with HTTP {status}: {description}")]
    Rejected { status: u16, description: String },

    #[error("notification delivery timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

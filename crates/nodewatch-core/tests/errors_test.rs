use nodewatch_core::errors::*;

#[test]
fn snapshot_timeout_carries_duration() {
    let err = SnapshotError::Timeout { timeout_ms: 30_000 };
    assert!(err.to_string().contains("30000"));
}

#[test]
fn snapshot_bad_status_carries_status_and_body() {
    let err = SnapshotError::BadStatus {
        status: 403,
        body: "forbidden".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("403"));
    assert!(msg.contains("forbidden"));
}

#[test]
fn notification_rejected_carries_description() {
    let err = NotificationError::Rejected {
        status: 400,
        description: "chat not found".into(),
    };
    assert!(err.to_string().contains("chat not found"));
}

// --- From impls ---

#[test]
fn snapshot_error_converts_to_nodewatch_error() {
    let err: NodeWatchError = SnapshotError::Unavailable {
        reason: "connection refused".into(),
    }
    .into();
    assert!(matches!(err, NodeWatchError::Snapshot(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn notification_error_converts_to_nodewatch_error() {
    let err: NodeWatchError = NotificationError::Timeout { timeout_ms: 10 }.into();
    assert!(matches!(err, NodeWatchError::Notification(_)));
}

#[test]
fn config_error_converts_to_nodewatch_error() {
    let err: NodeWatchError = ConfigError::MissingDestination.into();
    assert!(matches!(err, NodeWatchError::Config(_)));
    assert!(err.to_string().starts_with("configuration error"));
}

#[test]
fn out_of_range_names_field_and_limit() {
    let err = ConfigError::OutOfRange {
        field: "monitor.alert_threshold_secs",
        value: 99,
        max: 10,
    };
    let msg = err.to_string();
    assert!(msg.contains("monitor.alert_threshold_secs"));
    assert!(msg.contains("99"));
    assert!(msg.contains("10"));
}

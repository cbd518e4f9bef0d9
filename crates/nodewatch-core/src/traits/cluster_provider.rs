use std::sync::Arc;

use crate::errors::SnapshotError;
use crate::models::Snapshot;

/// Source of node readiness snapshots.
///
/// Implementations own pagination and credentials. Failures are treated as
/// transient by the monitor: the tick is skipped and retried on the next one.
#[allow(async_fn_in_trait)]
pub trait IClusterStateProvider: Send + Sync {
    /// Fetch the readiness of every currently visible node.
    async fn list_node_readiness(&self) -> Result<Snapshot, SnapshotError>;

    /// Human-readable provider name for logs.
    fn name(&self) -> &str;
}

impl<T: IClusterStateProvider> IClusterStateProvider for Arc<T> {
    async fn list_node_readiness(&self) -> Result<Snapshot, SnapshotError> {
        (**self).list_node_readiness().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

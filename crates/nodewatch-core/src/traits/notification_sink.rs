use std::sync::Arc;

use crate::errors::NotificationError;

/// Outbound channel delivering text alerts to a fixed destination.
#[allow(async_fn_in_trait)]
pub trait INotificationSink: Send + Sync {
    /// Deliver `text` to `destination`.
    async fn notify(&self, destination: &str, text: &str) -> Result<(), NotificationError>;

    /// Human-readable sink name for logs.
    fn name(&self) -> &str;
}

impl<T: INotificationSink> INotificationSink for Arc<T> {
    async fn notify(&self, destination: &str, text: &str) -> Result<(), NotificationError> {
        (**self).notify(destination, text).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

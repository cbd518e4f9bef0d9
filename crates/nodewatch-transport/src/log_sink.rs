use nodewatch_core::errors::NotificationError;
use nodewatch_core::traits::INotificationSink;
use tracing::warn;

/// Writes alerts to the log. Used when no bot token is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl INotificationSink for LogSink {
    async fn notify(&self, destination: &str, text: &str) -> Result<(), NotificationError> {
        warn!(
            event = "alert_logged",
            destination = %destination,
            text = %text,
            "nodewatch: alert (no notification channel configured)"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

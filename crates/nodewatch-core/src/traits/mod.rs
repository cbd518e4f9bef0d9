mod clock;
mod cluster_provider;
mod notification_sink;

pub use clock::{IClock, ManualClock, SystemClock};
pub use cluster_provider::IClusterStateProvider;
pub use notification_sink::INotificationSink;

//! Error taxonomy: transient snapshot and delivery failures, fatal configuration errors.

mod config_error;
mod nodewatch_error;
mod notification_error;
mod snapshot_error;

pub use config_error::ConfigError;
pub use nodewatch_error::{NodeWatchError, NodeWatchResult};
pub use notification_error::NotificationError;
pub use snapshot_error::SnapshotError;

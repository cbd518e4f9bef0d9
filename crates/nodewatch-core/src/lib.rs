//! # nodewatch-core
//!
//! Foundation crate for the nodewatch node health monitor.
//! Defines the ledger data model, collaborator traits, errors, config, and defaults.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::NodeWatchConfig;
pub use errors::{NodeWatchError, NodeWatchResult};
pub use models::{Alert, AlertKind, NodeState, Snapshot, TrackedNode};
pub use traits::{IClock, IClusterStateProvider, INotificationSink, ManualClock, SystemClock};

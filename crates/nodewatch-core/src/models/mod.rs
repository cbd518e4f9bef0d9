mod alert;
mod snapshot;
mod tracked_node;

pub use alert::{Alert, AlertKind};
pub use snapshot::Snapshot;
pub use tracked_node::{NodeState, TrackedNode};

//! # nodewatch-monitor
//!
//! The node health state machine: an in-memory ledger of every node ever seen,
//! reconciliation of readiness snapshots against it with a per-incident alert latch,
//! alert rendering, and the cancellable poll loop that drives it all.

pub mod engine;
pub mod ledger;
pub mod reconcile;
pub mod render;
pub mod stats;
pub mod tracing_setup;

pub use engine::Monitor;
pub use ledger::{Ledger, LedgerReader, StatusView};
pub use reconcile::{reconcile, Reconciliation, Transition};
pub use render::{format_duration, render_alert, render_startup};
pub use stats::{MonitorStats, TickReport};

/// Re-exported so callers can build shutdown tokens without depending on tokio-util directly.
pub use tokio_util::sync::CancellationToken;

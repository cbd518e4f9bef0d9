//! [`Monitor`] owns the ledger and drives poll, reconcile, and notify on a fixed schedule.

use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use nodewatch_core::config::MonitorConfig;
use nodewatch_core::errors::{ConfigError, NotificationError, SnapshotError};
use nodewatch_core::models::{Alert, Snapshot};
use nodewatch_core::traits::{IClock, IClusterStateProvider, INotificationSink, SystemClock};

use crate::ledger::{Ledger, LedgerReader};
use crate::reconcile::reconcile;
use crate::render::{render_alert, render_startup};
use crate::stats::{StatsCounters, TickReport};
use crate::tracing_setup::events;

/// Node health monitor.
///
/// The sole writer of its [`Ledger`]. Ticks run strictly one after another:
/// a tick's reconciliation and every delivery it triggers finish before the
/// next fetch starts. Delivery is fire-and-forget; a failed send is logged and
/// the incident's latch stays set.
pub struct Monitor<P, S, C = SystemClock> {
    config: MonitorConfig,
    destination: String,
    provider: P,
    sink: S,
    clock: C,
    ledger: Arc<Ledger>,
    stats: Arc<StatsCounters>,
    ticks: u64,
}

impl<P, S> Monitor<P, S, SystemClock>
where
    P: IClusterStateProvider,
    S: INotificationSink,
{
    /// Create a monitor with a fresh ledger, validating the poll configuration.
    pub fn new(
        config: MonitorConfig,
        destination: impl Into<String>,
        provider: P,
        sink: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let destination = destination.into();
        if config.enabled && destination.trim().is_empty() {
            return Err(ConfigError::MissingDestination);
        }
        Ok(Self {
            config,
            destination,
            provider,
            sink,
            clock: SystemClock,
            ledger: Arc::new(Ledger::new()),
            stats: Arc::new(StatsCounters::default()),
            ticks: 0,
        })
    }
}

impl<P, S, C> Monitor<P, S, C>
where
    P: IClusterStateProvider,
    S: INotificationSink,
    C: IClock,
{
    /// Replace the clock used to timestamp reconciliation.
    pub fn with_clock<C2: IClock>(self, clock: C2) -> Monitor<P, S, C2> {
        Monitor {
            config: self.config,
            destination: self.destination,
            provider: self.provider,
            sink: self.sink,
            clock,
            ledger: self.ledger,
            stats: self.stats,
            ticks: self.ticks,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Read-only handle for other tasks.
    pub fn reader(&self) -> LedgerReader {
        LedgerReader::new(Arc::clone(&self.ledger), Arc::clone(&self.stats))
    }

    /// Run one full cycle: fetch, reconcile, deliver.
    pub async fn tick(&mut self) -> TickReport {
        let fetched = self.fetch().await;
        self.apply(fetched).await
    }

    /// Poll on `check_interval` until `shutdown` is cancelled.
    ///
    /// Cancellation is observed while waiting for the next tick and while a
    /// fetch is in flight (the fetch is dropped and nothing is reconciled).
    /// A reconciliation that has started runs to completion, so the ledger is
    /// never touched after this returns.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        if !self.config.enabled {
            events::monitor_disabled();
            return;
        }

        events::monitor_started(
            self.provider.name(),
            self.sink.name(),
            self.config.check_interval_secs,
            self.config.alert_threshold_secs,
        );

        if self.config.announce_startup {
            let text = render_startup(
                self.config.check_interval_delta(),
                self.config.alert_threshold(),
            );
            let delivered = self.deliver(&text).await;
            if let Err(e) = &delivered {
                events::delivery_failed("startup", "-", e);
            }
            self.stats.record_delivery(delivered.is_ok());
        }

        let mut ticker = tokio::time::interval(self.config.check_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let fetched = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                fetched = self.fetch() => fetched,
            };
            self.apply(fetched).await;
        }

        events::monitor_stopped(self.ticks);
    }

    /// Fetch a snapshot, bounded by `fetch_timeout`.
    async fn fetch(&self) -> Result<Snapshot, SnapshotError> {
        let timeout = self.config.fetch_timeout();
        match tokio::time::timeout(timeout, self.provider.list_node_readiness()).await {
            Ok(result) => result,
            Err(_) => Err(SnapshotError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Reconcile a fetch result and dispatch the resulting alerts.
    async fn apply(&mut self, fetched: Result<Snapshot, SnapshotError>) -> TickReport {
        self.ticks += 1;
        let span = crate::tick_span!(self.ticks);
        let report = self.apply_inner(fetched).instrument(span).await;
        self.stats.record(&report);
        report
    }

    async fn apply_inner(&self, fetched: Result<Snapshot, SnapshotError>) -> TickReport {
        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(e) => {
                events::snapshot_failed(self.provider.name(), &e);
                return TickReport {
                    skipped: true,
                    ..TickReport::default()
                };
            }
        };

        let now = self.clock.now();
        let outcome = reconcile(&self.ledger, &snapshot, now, self.config.alert_threshold());
        for t in &outcome.transitions {
            events::node_transition(&t.node, t.from, t.to);
        }

        let mut report = TickReport {
            at: Some(now),
            skipped: false,
            nodes_seen: snapshot.len(),
            ready: snapshot.ready_count(),
            missing: outcome.missing,
            transitions: outcome.transitions.len(),
            ..TickReport::default()
        };

        for alert in &outcome.alerts {
            if self.dispatch(alert).await {
                report.alerts_sent += 1;
            } else {
                report.delivery_failures += 1;
            }
        }

        if let Some(bound) = self.config.prune_missing_after() {
            let removed = self.ledger.prune_missing(now, bound);
            if !removed.is_empty() {
                events::nodes_pruned(&removed);
            }
            report.pruned = removed.len();
        }

        events::tick_completed(&report);
        report
    }

    /// Deliver one alert. Returns whether it was accepted by the sink.
    async fn dispatch(&self, alert: &Alert) -> bool {
        let span = crate::dispatch_span!(alert.kind, alert.node);
        let text = render_alert(alert);
        match self.deliver(&text).instrument(span).await {
            Ok(()) => {
                events::alert_dispatched(alert.kind, &alert.node);
                true
            }
            Err(e) => {
                events::delivery_failed(&alert.kind.to_string(), &alert.node, &e);
                false
            }
        }
    }

    /// Send `text`, bounded by `notify_timeout`. A timeout counts as a failure.
    async fn deliver(&self, text: &str) -> Result<(), NotificationError> {
        let timeout = self.config.notify_timeout();
        match tokio::time::timeout(timeout, self.sink.notify(&self.destination, text)).await {
            Ok(result) => result,
            Err(_) => Err(NotificationError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}

impl<P, S, C> std::fmt::Debug for Monitor<P, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("config", &self.config)
            .field("destination", &self.destination)
            .field("tracked_nodes", &self.ledger.len())
            .field("ticks", &self.ticks)
            .finish()
    }
}

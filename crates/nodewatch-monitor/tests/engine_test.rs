//! Monitor lifecycle: failure isolation, delivery timeouts, the run loop, and the reader.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, TimeZone, Utc};

use nodewatch_core::config::MonitorConfig;
use nodewatch_core::errors::ConfigError;
use nodewatch_core::models::{NodeState, Snapshot};
use nodewatch_core::traits::ManualClock;
use nodewatch_monitor::{CancellationToken, Monitor};
use nodewatch_test_fixtures::{RecordingSink, ScriptedProvider};

type TestMonitor = Monitor<Arc<ScriptedProvider>, Arc<RecordingSink>, ManualClock>;

fn snap(nodes: &[(&str, bool)]) -> Snapshot {
    nodes.iter().copied().collect()
}

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap()
}

fn build(
    config: MonitorConfig,
    provider: &Arc<ScriptedProvider>,
    sink: &Arc<RecordingSink>,
) -> (TestMonitor, ManualClock) {
    let clock = ManualClock::new(start());
    let monitor = Monitor::new(config, "chat-1", Arc::clone(provider), Arc::clone(sink))
        .expect("valid config")
        .with_clock(clock.clone());
    (monitor, clock)
}

/// Drive `n` minute-spaced ticks, all reporting `nodes`.
async fn minutes(monitor: &mut TestMonitor, clock: &ManualClock, provider: &ScriptedProvider, n: usize, nodes: &[(&str, bool)]) {
    for _ in 0..n {
        clock.advance(Duration::minutes(1));
        provider.push(snap(nodes));
        monitor.tick().await;
    }
}

// ─── Construction ────────────────────────────────────────────

#[test]
fn new_rejects_invalid_config() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let config = MonitorConfig {
        check_interval_secs: 0,
        ..MonitorConfig::default()
    };
    let err = Monitor::new(config, "chat", provider, sink).unwrap_err();
    assert!(matches!(err, ConfigError::NonPositive { .. }));
}

#[test]
fn new_rejects_threshold_that_cannot_be_represented() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let config = MonitorConfig {
        alert_threshold_secs: u64::MAX,
        ..MonitorConfig::default()
    };
    let err = Monitor::new(config, "chat", provider, sink).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
}

#[test]
fn new_requires_destination_when_enabled() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let err = Monitor::new(MonitorConfig::default(), "", provider, sink).unwrap_err();
    assert!(matches!(err, ConfigError::MissingDestination));
}

// ─── Failure isolation ───────────────────────────────────────

#[tokio::test]
async fn fetch_failure_skips_tick_without_touching_ledger() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let (mut monitor, clock) = build(MonitorConfig::default(), &provider, &sink);
    let reader = monitor.reader();

    provider.push(snap(&[("n", true)]));
    monitor.tick().await;
    let before = reader.get("n").unwrap();

    clock.advance(Duration::minutes(30));
    provider.push_failure("apiserver down");
    let report = monitor.tick().await;

    assert!(report.skipped);
    assert_eq!(reader.get("n").unwrap(), before);
    assert!(sink.sent().is_empty());
    assert_eq!(reader.stats().fetch_failures, 1);
    assert_eq!(reader.stats().ticks, 2);
}

#[tokio::test]
async fn failed_delivery_still_commits_latch_and_is_not_retried() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::failing());
    let (mut monitor, clock) = build(MonitorConfig::default(), &provider, &sink);
    let reader = monitor.reader();

    provider.push(snap(&[("n", true)]));
    monitor.tick().await;
    minutes(&mut monitor, &clock, &provider, 15, &[("n", false)]).await;

    // One attempt only, even though it failed.
    assert_eq!(sink.sent().len(), 1);
    assert!(reader.get("n").unwrap().alerted);
    let stats = reader.stats();
    assert_eq!(stats.delivery_failures, 1);
    assert_eq!(stats.alerts_sent, 0);

    // Recovery is still reported once the sink works again.
    sink.set_failing(false);
    minutes(&mut monitor, &clock, &provider, 1, &[("n", true)]).await;
    assert_eq!(sink.count_containing("Back Online"), 1);
    assert!(!reader.get("n").unwrap().alerted);
}

#[tokio::test(start_paused = true)]
async fn slow_fetch_times_out_and_skips() {
    let provider = Arc::new(ScriptedProvider::new().with_delay(StdDuration::from_secs(45)));
    let sink = Arc::new(RecordingSink::new());
    let config = MonitorConfig {
        fetch_timeout_secs: 30,
        ..MonitorConfig::default()
    };
    let (mut monitor, _clock) = build(config, &provider, &sink);

    provider.push(snap(&[("n", true)]));
    let report = monitor.tick().await;
    assert!(report.skipped);
    assert!(monitor.reader().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stalled_delivery_times_out_as_failure() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::stalling(StdDuration::from_secs(60)));
    let config = MonitorConfig {
        notify_timeout_secs: 5,
        ..MonitorConfig::default()
    };
    let (mut monitor, clock) = build(config, &provider, &sink);

    provider.push(snap(&[("n", true)]));
    monitor.tick().await;
    clock.advance(Duration::minutes(10));
    provider.push(snap(&[("n", false)]));
    let report = monitor.tick().await;

    assert_eq!(report.alerts_sent, 0);
    assert_eq!(report.delivery_failures, 1);
    assert!(monitor.reader().get("n").unwrap().alerted);
}

// ─── Tick reports and the reader ─────────────────────────────

#[tokio::test]
async fn tick_report_counts_nodes_and_alerts() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let (mut monitor, clock) = build(MonitorConfig::default(), &provider, &sink);

    provider.push(snap(&[("a", true), ("b", true), ("c", true)]));
    let first = monitor.tick().await;
    assert_eq!(first.nodes_seen, 3);
    assert_eq!(first.ready, 3);
    assert_eq!(first.transitions, 3);

    clock.advance(Duration::minutes(11));
    provider.push(snap(&[("a", true), ("b", false)]));
    let second = monitor.tick().await;
    assert_eq!(second.nodes_seen, 2);
    assert_eq!(second.ready, 1);
    assert_eq!(second.missing, 1);
    assert_eq!(second.transitions, 2);
    assert_eq!(second.alerts_sent, 2);
    assert_eq!(second.at, Some(start() + Duration::minutes(11)));
}

#[tokio::test]
async fn messages_go_to_configured_destination() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let (mut monitor, clock) = build(MonitorConfig::default(), &provider, &sink);

    provider.push(snap(&[("n", true)]));
    monitor.tick().await;
    clock.advance(Duration::minutes(10));
    provider.push(snap(&[]));
    monitor.tick().await;

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination, "chat-1");
    assert!(sent[0].text.contains("Missing for: 10m"));
}

#[tokio::test]
async fn status_view_lists_alerted_nodes() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let (mut monitor, clock) = build(MonitorConfig::default(), &provider, &sink);
    let reader = monitor.reader();

    provider.push(snap(&[("a", true), ("b", true)]));
    monitor.tick().await;
    minutes(&mut monitor, &clock, &provider, 10, &[("a", true), ("b", false)]).await;

    let status = reader.status();
    assert_eq!(status.nodes.len(), 2);
    assert_eq!(status.alerted.len(), 1);
    assert_eq!(status.alerted[0].name, "b");
    assert_eq!(status.alerted[0].observed_state, NodeState::NotReady);
    assert_eq!(status.stats.alerts_sent, 1);

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["alerted"][0]["observed_state"], "not_ready");
}

#[tokio::test]
async fn pruning_drops_long_missing_nodes() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let config = MonitorConfig {
        prune_missing_after_secs: Some(3600),
        ..MonitorConfig::default()
    };
    let (mut monitor, clock) = build(config, &provider, &sink);

    provider.push(snap(&[("keep", true), ("gone", true)]));
    monitor.tick().await;
    clock.advance(Duration::minutes(30));
    provider.push(snap(&[("keep", true)]));
    assert_eq!(monitor.tick().await.pruned, 0);

    clock.advance(Duration::minutes(31));
    provider.push(snap(&[("keep", true)]));
    assert_eq!(monitor.tick().await.pruned, 1);
    assert!(monitor.reader().get("gone").is_none());
    assert_eq!(sink.count_containing("Node Missing"), 1);
}

// ─── Run loop ────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn run_ticks_on_interval_until_cancelled() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push(snap(&[("n", true)]));
    let sink = Arc::new(RecordingSink::new());
    let (mut monitor, _clock) = build(MonitorConfig::default(), &provider, &sink);
    let reader = monitor.reader();

    let shutdown = CancellationToken::new();
    let stopper = {
        let shutdown = shutdown.clone();
        async move {
            tokio::time::sleep(StdDuration::from_secs(150)).await;
            shutdown.cancel();
        }
    };
    tokio::join!(monitor.run(shutdown.clone()), stopper);

    // Ticks at 0s, 60s, 120s.
    assert_eq!(provider.calls(), 3);
    assert_eq!(reader.stats().ticks, 3);
    assert_eq!(reader.get("n").unwrap().observed_state, NodeState::Ready);
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_fetch_leaves_ledger_untouched() {
    let provider = Arc::new(ScriptedProvider::new().with_delay(StdDuration::from_secs(20)));
    provider.push(snap(&[("n", true)]));
    let sink = Arc::new(RecordingSink::new());
    let (mut monitor, _clock) = build(MonitorConfig::default(), &provider, &sink);
    let reader = monitor.reader();

    let shutdown = CancellationToken::new();
    let stopper = {
        let shutdown = shutdown.clone();
        async move {
            tokio::time::sleep(StdDuration::from_secs(10)).await;
            shutdown.cancel();
        }
    };
    tokio::join!(monitor.run(shutdown.clone()), stopper);

    assert_eq!(provider.calls(), 1);
    assert!(reader.is_empty());
    assert_eq!(reader.stats().ticks, 0);
}

#[tokio::test(start_paused = true)]
async fn already_cancelled_token_stops_before_first_tick() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let (mut monitor, _clock) = build(MonitorConfig::default(), &provider, &sink);

    let shutdown = CancellationToken::new();
    shutdown.cancel();
    monitor.run(shutdown).await;
    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn disabled_monitor_returns_immediately() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(RecordingSink::new());
    let config = MonitorConfig {
        enabled: false,
        ..MonitorConfig::default()
    };
    let clock = ManualClock::new(start());
    let mut monitor = Monitor::new(config, "", Arc::clone(&provider), Arc::clone(&sink))
        .unwrap()
        .with_clock(clock);

    monitor.run(CancellationToken::new()).await;
    assert_eq!(provider.calls(), 0);
    assert!(sink.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn startup_announcement_is_sent_once() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push(snap(&[("n", true)]));
    let sink = Arc::new(RecordingSink::new());
    let config = MonitorConfig {
        announce_startup: true,
        ..MonitorConfig::default()
    };
    let (mut monitor, _clock) = build(config, &provider, &sink);

    let shutdown = CancellationToken::new();
    let stopper = {
        let shutdown = shutdown.clone();
        async move {
            tokio::time::sleep(StdDuration::from_secs(90)).await;
            shutdown.cancel();
        }
    };
    tokio::join!(monitor.run(shutdown.clone()), stopper);

    assert_eq!(sink.count_containing("monitor started"), 1);
    assert_eq!(sink.sent().len(), 1);
}

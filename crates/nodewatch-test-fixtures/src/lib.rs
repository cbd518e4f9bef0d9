//! Test doubles for the nodewatch collaborators plus a loader for the JSON fixtures
//! under the workspace `test-fixtures/` directory.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;

use nodewatch_core::errors::{NotificationError, SnapshotError};
use nodewatch_core::models::Snapshot;
use nodewatch_core::traits::{IClusterStateProvider, INotificationSink};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").is_dir() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Read a fixture file as a string.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture_text(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", relative_path, e))
}

// ---------------------------------------------------------------------------
// Scenario fixtures
// ---------------------------------------------------------------------------

/// A scripted monitoring scenario: one entry per tick, `None` meaning the fetch fails.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Scenario {
    pub check_interval_secs: u64,
    pub alert_threshold_secs: u64,
    pub ticks: Vec<Option<Snapshot>>,
    pub expected: Vec<ExpectedAlert>,
}

/// An alert the scenario expects, identified by the tick that emits it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ExpectedAlert {
    pub tick: usize,
    pub kind: String,
    pub node: String,
}

/// Load a scenario from `test-fixtures/scenarios/<name>.json`.
pub fn load_scenario(name: &str) -> Scenario {
    load_fixture(&format!("scenarios/{name}.json"))
}

// ---------------------------------------------------------------------------
// Scripted provider
// ---------------------------------------------------------------------------

/// Provider that replays queued results. Once the script runs out it keeps
/// returning the last successful snapshot.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Snapshot, String>>>,
    last: Mutex<Snapshot>,
    delay: Option<Duration>,
    calls: Mutex<usize>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every fetch, for timeout and cancellation tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, snapshot: Snapshot) {
        self.script.lock().unwrap().push_back(Ok(snapshot));
    }

    pub fn push_failure(&self, reason: &str) {
        self.script.lock().unwrap().push_back(Err(reason.to_string()));
    }

    /// Queue `snapshot` (or a failure for `None`).
    pub fn push_tick(&self, tick: Option<Snapshot>) {
        match tick {
            Some(snapshot) => self.push(snapshot),
            None => self.push_failure("scripted outage"),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl IClusterStateProvider for ScriptedProvider {
    async fn list_node_readiness(&self) -> Result<Snapshot, SnapshotError> {
        *self.calls.lock().unwrap() += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(snapshot)) => {
                *self.last.lock().unwrap() = snapshot.clone();
                Ok(snapshot)
            }
            Some(Err(reason)) => Err(SnapshotError::Unavailable { reason }),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Recording sink
// ---------------------------------------------------------------------------

/// A message the recording sink accepted (or was asked to deliver, when failing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: String,
    pub text: String,
}

/// Sink that records every delivery attempt. Can be told to fail or stall.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<SentMessage>>,
    failing: Mutex<bool>,
    stall: Option<Duration>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delivery fails with `Unreachable`.
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    /// Every delivery sleeps for `stall` before succeeding.
    pub fn stalling(stall: Duration) -> Self {
        Self {
            stall: Some(stall),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// All attempted deliveries, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.texts().iter().filter(|t| t.contains(needle)).count()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl INotificationSink for RecordingSink {
    async fn notify(&self, destination: &str, text: &str) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(SentMessage {
            destination: destination.to_string(),
            text: text.to_string(),
        });
        if let Some(stall) = self.stall {
            tokio::time::sleep(stall).await;
        }
        if *self.failing.lock().unwrap() {
            return Err(NotificationError::Unreachable {
                reason: "recording sink set to fail".into(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

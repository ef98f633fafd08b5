//! Pass/fail signalling to the invoking harness.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Aggregate result of one verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Passed,
    Failed,
}

impl TestOutcome {
    #[must_use]
    pub fn from_passed(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }
}

impl std::fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => f.write_str("PASSED"),
            Self::Failed => f.write_str("FAILED"),
        }
    }
}

/// Receives one signal per `verify()` call.
pub trait OutcomeReporter {
    fn report(&self, outcome: TestOutcome);
}

/// Drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl OutcomeReporter for NullReporter {
    fn report(&self, _outcome: TestOutcome) {}
}

/// Logs the outcome under a test name.
#[derive(Debug, Clone)]
pub struct LogReporter {
    test: String,
}

impl LogReporter {
    pub fn new(test: impl Into<String>) -> Self {
        Self { test: test.into() }
    }
}

impl OutcomeReporter for LogReporter {
    fn report(&self, outcome: TestOutcome) {
        match outcome {
            TestOutcome::Passed => info!(test = %self.test, "{} PASSED", self.test),
            TestOutcome::Failed => warn!(test = %self.test, "{} FAILED", self.test),
        }
    }
}

/// Forwards outcomes over an mpsc channel. A disconnected receiver is
/// ignored.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: Sender<TestOutcome>,
}

impl ChannelReporter {
    #[must_use]
    pub fn new(tx: Sender<TestOutcome>) -> Self {
        Self { tx }
    }
}

impl OutcomeReporter for ChannelReporter {
    fn report(&self, outcome: TestOutcome) {
        let _ = self.tx.send(outcome);
    }
}
